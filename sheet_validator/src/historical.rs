use log::{debug, info, warn};

use crate::config::*;
use crate::errors::ValidationErrors;

/// Prefix of the warning emitted when a submission only carries the state total.
pub const ONLY_WITH_TOTAL_WARNING: &str = "Planilha importada somente com dados totais.";

/// Compares a submission with the last accepted one for the same state.
///
/// The undefined row is compared as any other city. Cities that
/// disappeared with non-zero data are errors. Cities that
/// disappeared with zero data are carried over into the submission. Counts
/// that went down are warnings only: downward corrections happen.
///
/// Returns the warnings. The submission is updated in place with the
/// carried-over cities.
pub fn reconcile(
    submission: &mut Submission,
    previous: Option<&Submission>,
    errors: &mut ValidationErrors,
) -> Vec<String> {
    debug!(
        "reconcile: {} {}: {} records, previous: {:?}",
        submission.state,
        submission.date,
        submission.records.len(),
        previous.map(|p| p.date)
    );
    let mut warnings = if submission.has_only_total() {
        reconcile_only_total(submission, previous)
    } else {
        reconcile_cities(submission, previous, errors)
    };

    let previous_total = previous.and_then(|p| p.total_record());
    if let (Some(prev), Some(cur)) = (previous_total, submission.total_record()) {
        if cur.is_lower_than(prev) {
            warnings.push(
                "Números de confirmados ou óbitos totais é menor que o total anterior.".to_string(),
            );
        }
    }

    for w in warnings.iter() {
        warn!("reconcile: {}", w);
    }
    warnings
}

/// Full submission: every city seen before must still be there.
fn reconcile_cities(
    submission: &mut Submission,
    previous: Option<&Submission>,
    errors: &mut ValidationErrors,
) -> Vec<String> {
    let mut warnings: Vec<String> = Vec::new();
    let previous = match previous {
        Some(p) => p,
        None => return warnings,
    };

    let mut carried: Vec<NormalizedRecord> = Vec::new();
    for prev in previous.place_records() {
        let city = prev.city.clone().unwrap_or_default();
        match submission.place_record(prev.city_ibge_code) {
            None if prev.confirmed != 0 || prev.deaths != 0 => {
                errors.new_error(format!(
                    "{} possui dados históricos e não está presente na planilha.",
                    city
                ));
            }
            None => {
                carried.push(carry_forward(prev, submission.date));
                warnings.push(format!(
                    "{} possui dados históricos zerados/nulos, não presente na planilha e foi adicionado.",
                    city
                ));
            }
            Some(cur) if cur.is_lower_than(prev) => {
                warnings.push(format!(
                    "Números de confirmados ou óbitos em {} é menor que o anterior.",
                    city
                ));
            }
            Some(_) => {}
        }
    }
    submission.records.extend(carried);
    warnings
}

/// Only the total was sent: all the cities are taken from the previous submission.
fn reconcile_only_total(submission: &mut Submission, previous: Option<&Submission>) -> Vec<String> {
    let previous = match previous {
        Some(p) => p,
        None => return vec![ONLY_WITH_TOTAL_WARNING.to_string()],
    };

    let carried: Vec<NormalizedRecord> = previous
        .place_records()
        .map(|prev| carry_forward(prev, submission.date))
        .collect();
    info!(
        "reconcile_only_total: reusing {} cities from {}",
        carried.len(),
        previous.date
    );
    submission.records.extend(carried);

    if previous.total_record().is_some() {
        vec![format!(
            "{} Dados de cidades foram reutilizados da importação do dia {}.",
            ONLY_WITH_TOTAL_WARNING, previous.date
        )]
    } else {
        vec![ONLY_WITH_TOTAL_WARNING.to_string()]
    }
}

fn carry_forward(previous: &NormalizedRecord, date: chrono::NaiveDate) -> NormalizedRecord {
    NormalizedRecord {
        date,
        ..previous.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 5, d).unwrap()
    }

    fn city(name: &str, code: u32, confirmed: i64, deaths: i64, d: u32) -> NormalizedRecord {
        NormalizedRecord {
            city: Some(name.to_string()),
            city_ibge_code: Some(code),
            confirmed,
            deaths,
            date: day(d),
            state: "PR".to_string(),
            place_type: PlaceType::City,
        }
    }

    fn total(confirmed: i64, deaths: i64, d: u32) -> NormalizedRecord {
        NormalizedRecord {
            city: None,
            city_ibge_code: Some(41),
            confirmed,
            deaths,
            date: day(d),
            state: "PR".to_string(),
            place_type: PlaceType::State,
        }
    }

    fn undefined(confirmed: i64, deaths: i64, d: u32) -> NormalizedRecord {
        NormalizedRecord {
            city: Some(UNDEFINED_DISPLAY.to_string()),
            city_ibge_code: None,
            ..city("", 0, confirmed, deaths, d)
        }
    }

    fn submission(d: u32, records: Vec<NormalizedRecord>) -> Submission {
        Submission {
            state: "PR".to_string(),
            date: day(d),
            records,
        }
    }

    fn previous() -> Submission {
        submission(
            3,
            vec![
                total(8, 2, 3),
                city("Curitiba", 4106902, 5, 1, 3),
                city("Londrina", 4113700, 0, 0, 3),
                undefined(3, 1, 3),
            ],
        )
    }

    #[test]
    fn no_previous_submission() {
        let mut cur = submission(4, vec![total(8, 2, 4), city("Curitiba", 4106902, 8, 2, 4)]);
        let mut errors = ValidationErrors::new();
        let warnings = reconcile(&mut cur, None, &mut errors);
        assert!(warnings.is_empty());
        assert!(errors.is_empty());
        assert_eq!(cur.records.len(), 2);
    }

    #[test]
    fn missing_city_with_data_is_an_error() {
        let mut cur = submission(4, vec![total(10, 2, 4), undefined(10, 2, 4)]);
        let mut errors = ValidationErrors::new();
        reconcile(&mut cur, Some(&previous()), &mut errors);
        assert_eq!(
            errors.messages(),
            &["Curitiba possui dados históricos e não está presente na planilha.".to_string()]
        );
    }

    #[test]
    fn missing_city_without_data_is_added() {
        let mut cur = submission(
            4,
            vec![total(10, 2, 4), city("Curitiba", 4106902, 6, 1, 4), undefined(4, 1, 4)],
        );
        let mut errors = ValidationErrors::new();
        let warnings = reconcile(&mut cur, Some(&previous()), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(
            warnings,
            vec!["Londrina possui dados históricos zerados/nulos, não presente na planilha e foi adicionado."]
        );
        assert_eq!(cur.records.len(), 4);
        assert_eq!(cur.records[3], city("Londrina", 4113700, 0, 0, 4));
    }

    #[test]
    fn lower_numbers_only_warn() {
        let mut cur = submission(
            4,
            vec![
                total(7, 2, 4),
                city("Curitiba", 4106902, 4, 1, 4),
                city("Londrina", 4113700, 0, 0, 4),
                undefined(3, 1, 4),
            ],
        );
        let mut errors = ValidationErrors::new();
        let warnings = reconcile(&mut cur, Some(&previous()), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(
            warnings,
            vec![
                "Números de confirmados ou óbitos em Curitiba é menor que o anterior.",
                "Números de confirmados ou óbitos totais é menor que o total anterior.",
            ]
        );
    }

    #[test]
    fn only_total_reuses_cities() {
        let mut cur = submission(4, vec![total(12, 3, 4)]);
        let mut errors = ValidationErrors::new();
        let warnings = reconcile(&mut cur, Some(&previous()), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(
            warnings,
            vec!["Planilha importada somente com dados totais. Dados de cidades foram reutilizados da importação do dia 2020-05-03."]
        );
        assert_eq!(
            cur.records,
            vec![
                total(12, 3, 4),
                city("Curitiba", 4106902, 5, 1, 4),
                city("Londrina", 4113700, 0, 0, 4),
                undefined(3, 1, 4),
            ]
        );
        let carried: i64 = cur.records.iter().filter(|r| !r.is_total()).map(|r| r.confirmed).sum();
        assert_eq!(carried, 8);
    }

    #[test]
    fn only_total_without_history() {
        let mut cur = submission(4, vec![total(12, 3, 4)]);
        let mut errors = ValidationErrors::new();
        let warnings = reconcile(&mut cur, None, &mut errors);
        assert_eq!(warnings, vec![ONLY_WITH_TOTAL_WARNING]);
        assert_eq!(cur.records.len(), 1);
    }

    #[test]
    fn lower_undefined_numbers_warn() {
        let mut cur = submission(
            4,
            vec![
                total(8, 2, 4),
                city("Curitiba", 4106902, 7, 1, 4),
                city("Londrina", 4113700, 0, 0, 4),
                undefined(1, 1, 4),
            ],
        );
        let mut errors = ValidationErrors::new();
        let warnings = reconcile(&mut cur, Some(&previous()), &mut errors);
        assert!(errors.is_empty());
        assert_eq!(
            warnings,
            vec!["Números de confirmados ou óbitos em Importados/Indefinidos é menor que o anterior."]
        );
    }

    #[test]
    fn missing_undefined_row_with_data_is_an_error() {
        let mut cur = submission(
            4,
            vec![
                total(8, 2, 4),
                city("Curitiba", 4106902, 8, 2, 4),
                city("Londrina", 4113700, 0, 0, 4),
            ],
        );
        let mut errors = ValidationErrors::new();
        reconcile(&mut cur, Some(&previous()), &mut errors);
        assert_eq!(
            errors.messages(),
            &["Importados/Indefinidos possui dados históricos e não está presente na planilha.".to_string()]
        );
    }
}
