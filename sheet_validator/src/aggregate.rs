use log::{debug, warn};

use crate::config::ValidationOptions;
use crate::errors::ValidationErrors;
use crate::rows::RowSummary;

/// Checks that the cities add up to the declared total.
///
/// A sum of zero means that no city contributed (only the total was sent) and
/// is never compared, nor is a sum that overflowed. Each check may be turned off by the submitter, in which
/// case a warning is returned instead.
pub fn check_sums(
    summary: &RowSummary,
    options: &ValidationOptions,
    errors: &mut ValidationErrors,
) -> Vec<String> {
    debug!(
        "check_sums: cases {}/{} deaths {}/{} options {:?}",
        summary.sum_cases, summary.total_cases, summary.sum_deaths, summary.total_deaths, options
    );
    let mut warnings: Vec<String> = Vec::new();

    if options.skip_sum_cases {
        warnings.push("A checagem da soma de casos por cidade com o valor total foi desativada.".to_string());
    } else if !summary.sum_overflow && summary.sum_cases != 0 && summary.sum_cases != summary.total_cases {
        errors.new_error(format!(
            "A soma de casos ({}) difere da entrada total ({}).",
            summary.sum_cases, summary.total_cases
        ));
    }

    if options.skip_sum_deaths {
        warnings.push("A checagem da soma de óbitos por cidade com o valor total foi desativada.".to_string());
    } else if !summary.sum_overflow && summary.sum_deaths != 0 && summary.sum_deaths != summary.total_deaths {
        errors.new_error(format!(
            "A soma de mortes ({}) difere da entrada total ({}).",
            summary.sum_deaths, summary.total_deaths
        ));
    }

    for w in warnings.iter() {
        warn!("check_sums: {}", w);
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: (i64, i64), sum: (i64, i64)) -> RowSummary {
        RowSummary {
            total_cases: total.0,
            total_deaths: total.1,
            sum_cases: sum.0,
            sum_deaths: sum.1,
            ..RowSummary::default()
        }
    }

    #[test]
    fn matching_sums() {
        let mut errors = ValidationErrors::new();
        let warnings = check_sums(&summary((10, 2), (10, 2)), &ValidationOptions::default(), &mut errors);
        assert!(warnings.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn mismatching_sums() {
        let mut errors = ValidationErrors::new();
        check_sums(&summary((10, 2), (9, 3)), &ValidationOptions::default(), &mut errors);
        assert_eq!(
            errors.messages(),
            &[
                "A soma de casos (9) difere da entrada total (10).".to_string(),
                "A soma de mortes (3) difere da entrada total (2).".to_string(),
            ]
        );
    }

    #[test]
    fn zero_sum_is_not_compared() {
        let mut errors = ValidationErrors::new();
        check_sums(&summary((10, 2), (0, 0)), &ValidationOptions::default(), &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn skipped_checks_only_warn() {
        let mut errors = ValidationErrors::new();
        let options = ValidationOptions {
            skip_sum_cases: true,
            skip_sum_deaths: false,
        };
        let warnings = check_sums(&summary((10, 2), (9, 3)), &options, &mut errors);
        assert_eq!(
            warnings,
            vec!["A checagem da soma de casos por cidade com o valor total foi desativada."]
        );
        assert_eq!(
            errors.messages(),
            &["A soma de mortes (3) difere da entrada total (2).".to_string()]
        );
    }

    #[test]
    fn overflowed_sums_are_not_compared() {
        let mut errors = ValidationErrors::new();
        let s = RowSummary {
            sum_overflow: true,
            ..summary((10, 2), (i64::MAX, 3))
        };
        let warnings = check_sums(&s, &ValidationOptions::default(), &mut errors);
        assert!(warnings.is_empty());
        assert!(errors.is_empty());
    }
}
