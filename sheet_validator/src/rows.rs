use chrono::NaiveDate;
use log::{debug, warn};
use std::collections::HashSet;

use crate::config::*;
use crate::errors::ValidationErrors;

/// How a row is treated, depending on the content of its city cell.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum RowKind {
    Total,
    Undefined,
    City,
}

impl RowKind {
    fn of(city: &str) -> RowKind {
        match city {
            TOTAL_LINE_DISPLAY => RowKind::Total,
            UNDEFINED_DISPLAY => RowKind::Undefined,
            _ => RowKind::City,
        }
    }
}

/// What the row validation produced: the records and the running totals.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RowSummary {
    pub records: Vec<NormalizedRecord>,
    pub warnings: Vec<String>,
    /// The values declared in the total row.
    pub total_cases: i64,
    pub total_deaths: i64,
    /// The sums over all the other rows.
    pub sum_cases: i64,
    pub sum_deaths: i64,
    pub has_total: bool,
    pub has_undefined: bool,
    /// The sums went past the range of the counts and cannot be compared.
    pub sum_overflow: bool,
}

/// Applies the rules of each row, and checks that the special rows are present.
///
/// Rows with problems are reported in `errors` and processing continues, so
/// that all the rows get checked.
pub fn validate_rows(
    table: &TabularInput,
    cols: &ResolvedColumns,
    date: NaiveDate,
    state: &str,
    lookup: &dyn CityLookup,
    errors: &mut ValidationErrors,
) -> RowSummary {
    let mut summary = RowSummary::default();
    let mut processed_cities: HashSet<String> = HashSet::new();

    for row in table.rows.iter() {
        let city_cell = table.get(row, &cols.city);
        let confirmed_cell = table.get(row, &cols.confirmed);
        let deaths_cell = table.get(row, &cols.deaths);
        debug!(
            "validate_rows: {:?} {:?} {:?}",
            city_cell, confirmed_cell, deaths_cell
        );

        let city = match city_cell.as_text() {
            Some(c) => c,
            None => {
                if confirmed_cell.is_truthy() || deaths_cell.is_truthy() {
                    errors.new_error("Uma ou mais linhas com a coluna de cidade vazia possuem números de confirmados ou óbitos");
                }
                continue;
            }
        };

        if !processed_cities.insert(city.clone()) {
            errors.new_error(format!("Mais de uma entrada para {}", city));
        }

        let kind = RowKind::of(&city);
        match kind {
            RowKind::Total => summary.has_total = true,
            RowKind::Undefined => summary.has_undefined = true,
            RowKind::City => {}
        }

        let (confirmed, deaths) = match (confirmed_cell.as_integer(), deaths_cell.as_integer()) {
            (Some(c), Some(d)) => (c, d),
            (None, None) => continue,
            _ => {
                errors.new_error(format!(
                    "Dados de casos ou óbitos incompletos na linha {}",
                    city
                ));
                continue;
            }
        };

        if deaths > confirmed {
            if kind == RowKind::Undefined {
                let msg = format!("{} com número óbitos maior que de casos confirmados.", city);
                warn!("validate_rows: {}", msg);
                summary.warnings.push(msg);
            } else {
                errors.new_error(format!(
                    "Valor de óbitos maior que casos confirmados na linha {} da planilha",
                    city
                ));
            }
        }
        if deaths < 0 || confirmed < 0 {
            errors.new_error(format!("Valores negativos na linha {} da planilha", city));
        }

        let record = match parse_city_data(kind, &city, confirmed, deaths, date, state, lookup) {
            Some(r) => r,
            None => {
                errors.new_error(format!("{} não pertence à UF {}", city, state));
                continue;
            }
        };

        if record.is_total() {
            summary.total_cases = confirmed;
            summary.total_deaths = deaths;
        } else {
            match (
                summary.sum_cases.checked_add(confirmed),
                summary.sum_deaths.checked_add(deaths),
            ) {
                (Some(c), Some(d)) => {
                    summary.sum_cases = c;
                    summary.sum_deaths = d;
                }
                _ => {
                    errors.new_error(format!("Valores muito grandes na linha {} da planilha", city));
                    summary.sum_overflow = true;
                }
            }
        }
        summary.records.push(record);
    }

    if !summary.has_total {
        errors.new_error(format!(
            "A linha \"{}\" está faltando na planilha",
            TOTAL_LINE_DISPLAY
        ));
    }
    if !summary.has_undefined && summary.records.len() > 1 {
        errors.new_error(format!(
            "A linha \"{}\" está faltando na planilha",
            UNDEFINED_DISPLAY
        ));
    }
    summary
}

/// Builds the record of a row. Returns None if the place is unknown.
fn parse_city_data(
    kind: RowKind,
    city: &str,
    confirmed: i64,
    deaths: i64,
    date: NaiveDate,
    state: &str,
    lookup: &dyn CityLookup,
) -> Option<NormalizedRecord> {
    let (city, city_ibge_code, place_type) = match kind {
        RowKind::Total => {
            let info = lookup.state_info(state)?;
            (None, Some(info.state_ibge_code), PlaceType::State)
        }
        RowKind::Undefined => (Some(city.to_string()), None, PlaceType::City),
        RowKind::City => match lookup.city_info(city, state) {
            CityInfo::Found {
                city_ibge_code,
                city,
            } => (Some(city), Some(city_ibge_code), PlaceType::City),
            CityInfo::NotFound => return None,
        },
    };
    Some(NormalizedRecord {
        city,
        city_ibge_code,
        confirmed,
        deaths,
        date,
        state: state.to_string(),
        place_type,
    })
}
