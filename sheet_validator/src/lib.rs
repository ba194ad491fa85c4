mod config;
use chrono::NaiveDate;
use log::{debug, info};

pub mod aggregate;
pub mod builder;
pub mod columns;
pub mod errors;
pub mod historical;
pub mod manual;
pub mod rows;
pub mod store;
pub mod type_guard;

pub use crate::config::*;
pub use crate::errors::{ColumnError, ValidationErrors};

/// Validates the spreadsheet of a state for a given date.
///
/// Arguments:
/// * `table` the content of the spreadsheet, with normalized field names
/// * `date` the date of the bulletin
/// * `state` the two-letter code of the state
/// * `options` the checks that the submitter chose to turn off
/// * `lookup` the registry of states and cities
/// * `history` the accepted submissions
///
/// On success, returns the canonical records, including the cities carried
/// over from the previous submission, and the warnings. Otherwise, returns
/// all the problems found up to the stage that failed.
pub fn validate_spreadsheet(
    table: &TabularInput,
    date: NaiveDate,
    state: &str,
    options: &ValidationOptions,
    lookup: &dyn CityLookup,
    history: &dyn HistoricalStore,
) -> Result<ValidationOutcome, ValidationErrors> {
    info!(
        "validate_spreadsheet: {} {}: {} rows, fields: {:?}",
        state,
        date,
        table.rows.len(),
        table.field_names
    );
    let mut errors = ValidationErrors::new();

    let cols = match columns::resolve_columns(&table.field_names, &mut errors) {
        Some(c) => c,
        None => return Err(errors),
    };
    debug!("validate_spreadsheet: columns: {:?}", cols);

    type_guard::check_types(table, &cols, &mut errors);
    errors.raise_if_errors()?;

    let summary = rows::validate_rows(table, &cols, date, state, lookup, &mut errors);
    let mut warnings = summary.warnings.clone();
    warnings.extend(aggregate::check_sums(&summary, options, &mut errors));

    let mut submission = Submission::new(state, date);
    submission.records = summary.records;
    let previous = history.most_recent_before(state, date);
    warnings.extend(historical::reconcile(
        &mut submission,
        previous.as_ref(),
        &mut errors,
    ));
    errors.raise_if_errors()?;

    info!(
        "validate_spreadsheet: {} {}: accepted {} records with {} warnings",
        state,
        date,
        submission.records.len(),
        warnings.len()
    );
    Ok(ValidationOutcome {
        records: submission.records,
        warnings,
    })
}
