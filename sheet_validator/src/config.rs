// ********* Input data structures ***********

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label of the row holding the state-wide total.
pub const TOTAL_LINE_DISPLAY: &str = "TOTAL NO ESTADO";
/// Label of the row holding the cases not attributed to any city yet.
pub const UNDEFINED_DISPLAY: &str = "Importados/Indefinidos";

/// A single typed cell, as produced by the tabular readers.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Empty,
    Int(i64),
    /// Any number with a fractional part, or read from a decimal-typed cell.
    Decimal(f64),
    Text(String),
}

impl CellValue {
    /// A cell holds something. Blank text is treated as empty.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Text(s) => !s.trim().is_empty(),
            _ => true,
        }
    }

    /// Zero and empty values are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            CellValue::Empty => false,
            CellValue::Int(i) => *i != 0,
            CellValue::Decimal(f) => *f != 0.0,
            CellValue::Text(s) => !s.trim().is_empty(),
        }
    }

    /// Strict integer view of the cell: decimals never convert, and text must
    /// be an optionally signed run of digits.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Int(i) => Some(*i),
            CellValue::Text(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Empty => None,
            CellValue::Int(i) => Some(i.to_string()),
            CellValue::Decimal(f) => Some(f.to_string()),
            CellValue::Text(s) if s.trim().is_empty() => None,
            CellValue::Text(s) => Some(s.trim().to_string()),
        }
    }
}

pub type Row = BTreeMap<String, CellValue>;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// The table handed over by the tabular reader.
///
/// Field names are expected to be already normalized (lowercase, no accents).
#[derive(PartialEq, Debug, Clone, Default)]
pub struct TabularInput {
    pub field_names: Vec<String>,
    pub rows: Vec<Row>,
}

impl TabularInput {
    pub fn get<'a>(&self, row: &'a Row, field: &str) -> &'a CellValue {
        row.get(field).unwrap_or(&EMPTY_CELL)
    }

    /// True if every non-empty cell of the column is an integer.
    pub fn is_integer_column(&self, field: &str) -> bool {
        self.rows
            .iter()
            .map(|r| self.get(r, field))
            .all(|c| matches!(c, CellValue::Int(_)) || !c.is_present())
    }
}

/// The three columns needed by the validation, once resolved from their aliases.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolvedColumns {
    pub confirmed: String,
    pub deaths: String,
    pub city: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct ValidationOptions {
    /// Replaces the check of the sum of cases with a warning.
    pub skip_sum_cases: bool,
    /// Replaces the check of the sum of deaths with a warning.
    pub skip_sum_deaths: bool,
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceType {
    City,
    State,
}

/// One line of the canonical dataset.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub city: Option<String>,
    pub city_ibge_code: Option<u32>,
    pub confirmed: i64,
    pub deaths: i64,
    pub date: NaiveDate,
    pub state: String,
    pub place_type: PlaceType,
}

impl NormalizedRecord {
    pub fn is_total(&self) -> bool {
        self.place_type == PlaceType::State
    }

    /// Strictly fewer cases or deaths than the previous record.
    pub fn is_lower_than(&self, previous: &NormalizedRecord) -> bool {
        self.confirmed < previous.confirmed || self.deaths < previous.deaths
    }
}

/// The set of records of one state at one date.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub state: String,
    pub date: NaiveDate,
    pub records: Vec<NormalizedRecord>,
}

impl Submission {
    pub fn new(state: &str, date: NaiveDate) -> Submission {
        Submission {
            state: state.to_string(),
            date,
            records: Vec::new(),
        }
    }

    pub fn total_record(&self) -> Option<&NormalizedRecord> {
        self.records.iter().find(|r| r.is_total())
    }

    /// The record of a place: a city by its IBGE code, or the undefined row
    /// when the code is None.
    pub fn place_record(&self, city_ibge_code: Option<u32>) -> Option<&NormalizedRecord> {
        self.records
            .iter()
            .find(|r| !r.is_total() && r.city_ibge_code == city_ibge_code)
    }

    /// The records of the named cities, keyed by IBGE code.
    pub fn city_records_by_code(&self) -> BTreeMap<u32, &NormalizedRecord> {
        self.records
            .iter()
            .filter(|r| !r.is_total())
            .filter_map(|r| r.city_ibge_code.map(|code| (code, r)))
            .collect()
    }

    /// Every record below the total: the cities by IBGE code, then the
    /// undefined row if there is one.
    pub fn place_records(&self) -> impl Iterator<Item = &NormalizedRecord> + '_ {
        self.city_records_by_code()
            .into_values()
            .chain(self.place_record(None))
    }

    /// The submission only carries the state total.
    pub fn has_only_total(&self) -> bool {
        matches!(self.records.as_slice(), [r] if r.is_total())
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ValidationOutcome {
    pub records: Vec<NormalizedRecord>,
    pub warnings: Vec<String>,
}

// ********* Collaborators **********

/// The outcome of looking up a city in a state.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum CityInfo {
    Found { city_ibge_code: u32, city: String },
    NotFound,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct StateInfo {
    pub state_ibge_code: u32,
}

pub trait CityLookup {
    fn city_info(&self, city: &str, state: &str) -> CityInfo;
    fn state_info(&self, state: &str) -> Option<StateInfo>;
}

/// Access to the submissions that have already been accepted.
pub trait HistoricalStore {
    /// The most recent accepted submission for the state, strictly before the date.
    fn most_recent_before(&self, state: &str, date: NaiveDate) -> Option<Submission>;
}
