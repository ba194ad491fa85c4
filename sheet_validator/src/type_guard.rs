use log::debug;

use crate::config::{CellValue, ResolvedColumns, TabularInput};
use crate::errors::ValidationErrors;

/// Returns the cities whose number of cases or deaths is not a clean integer,
/// in the order in which they first appear.
///
/// Decimal cells are always rejected, even when they hold a round number: they
/// usually come from formulas or from a thousands separator that was read as a
/// decimal point.
pub fn cities_with_type_errors(table: &TabularInput, cols: &ResolvedColumns) -> Vec<String> {
    if table.is_integer_column(&cols.confirmed) && table.is_integer_column(&cols.deaths) {
        return Vec::new();
    }

    let mut res: Vec<String> = Vec::new();
    for row in table.rows.iter() {
        let city = match table.get(row, &cols.city).as_text() {
            Some(c) => c,
            None => continue,
        };
        let confirmed = table.get(row, &cols.confirmed);
        let deaths = table.get(row, &cols.deaths);
        if !(is_clean_integer(confirmed) && is_clean_integer(deaths)) {
            debug!(
                "cities_with_type_errors: {}: confirmed {:?} deaths {:?}",
                city, confirmed, deaths
            );
            if !res.contains(&city) {
                res.push(city);
            }
        }
    }
    res
}

fn is_clean_integer(cell: &CellValue) -> bool {
    match cell {
        CellValue::Decimal(_) => false,
        c if !c.is_present() => true,
        c => c.as_integer().is_some(),
    }
}

/// Records a single error listing all the rows with formatting problems.
pub fn check_types(table: &TabularInput, cols: &ResolvedColumns, errors: &mut ValidationErrors) {
    let cities = cities_with_type_errors(table, cols);
    if !cities.is_empty() {
        errors.new_error(format!(
            "Erro no formato de algumas entradas dados: cheque para ver se a planilha não possui fórmulas ou números com ponto ou vírgula nas linhas: {}",
            cities.join(", ")
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TableBuilder;

    fn cols() -> ResolvedColumns {
        ResolvedColumns {
            confirmed: "confirmados".to_string(),
            deaths: "obitos".to_string(),
            city: "municipio".to_string(),
        }
    }

    fn builder() -> TableBuilder {
        TableBuilder::new(&["municipio", "confirmados", "obitos"])
    }

    #[test]
    fn integer_columns_are_accepted() {
        let mut b = builder();
        b.add_row(vec!["TOTAL NO ESTADO".into(), 10.into(), 2.into()]);
        b.add_row(vec!["Curitiba".into(), CellValue::Empty, CellValue::Empty]);
        assert!(cities_with_type_errors(&b.build(), &cols()).is_empty());
    }

    #[test]
    fn numeric_text_is_accepted() {
        let mut b = builder();
        b.add_row(vec!["Curitiba".into(), "12".into(), " 3 ".into()]);
        b.add_row(vec!["Londrina".into(), "".into(), 3.into()]);
        assert!(cities_with_type_errors(&b.build(), &cols()).is_empty());
    }

    #[test]
    fn decimals_and_punctuation_are_rejected() {
        let mut b = builder();
        b.add_row(vec!["Curitiba".into(), 1.5.into(), 0.into()]);
        b.add_row(vec!["Londrina".into(), "1.234".into(), 0.into()]);
        b.add_row(vec!["Maringá".into(), 7.into(), "=A1+A2".into()]);
        b.add_row(vec!["Cascavel".into(), 7.into(), 1.into()]);
        b.add_row(vec![CellValue::Empty, 1.5.into(), 0.into()]);
        let table = b.build();
        assert_eq!(
            cities_with_type_errors(&table, &cols()),
            vec!["Curitiba", "Londrina", "Maringá"]
        );

        let mut errors = ValidationErrors::new();
        check_types(&table, &cols(), &mut errors);
        assert_eq!(errors.len(), 1);
        assert!(errors.messages()[0].ends_with("Curitiba, Londrina, Maringá"));
    }
}
