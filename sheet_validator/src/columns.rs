use log::debug;

use crate::config::ResolvedColumns;
use crate::errors::{ColumnError, ValidationErrors};

/// Accepted names for the column of confirmed cases. The first one is the reference name.
pub const CONFIRMED_ALIASES: [&str; 3] = ["confirmados", "confirmado", "casos_confirmados"];
pub const DEATHS_ALIASES: [&str; 4] = ["obitos", "obito", "morte", "mortes"];
pub const CITY_ALIASES: [&str; 2] = ["municipio", "cidade"];

/// Finds the single field name that matches one of the aliases.
pub fn resolve_column(field_names: &[String], aliases: &[&str]) -> Result<String, ColumnError> {
    let reference = aliases.first().copied().unwrap_or_default().to_string();
    let candidates: Vec<String> = field_names
        .iter()
        .filter(|name| aliases.iter().any(|a| *a == name.as_str()))
        .cloned()
        .collect();
    match candidates.as_slice() {
        [] => Err(ColumnError::Missing { field: reference }),
        [name] => Ok(name.clone()),
        _ => Err(ColumnError::Ambiguous {
            field: reference,
            candidates,
        }),
    }
}

/// Resolves the three columns. Every failure is recorded, not only the first one.
pub fn resolve_columns(
    field_names: &[String],
    errors: &mut ValidationErrors,
) -> Option<ResolvedColumns> {
    let mut resolve = |aliases: &[&str]| match resolve_column(field_names, aliases) {
        Ok(name) => Some(name),
        Err(e) => {
            debug!("resolve_columns: {:?}", e);
            errors.new_error(e.to_string());
            None
        }
    };
    let confirmed = resolve(&CONFIRMED_ALIASES[..]);
    let deaths = resolve(&DEATHS_ALIASES[..]);
    let city = resolve(&CITY_ALIASES[..]);
    Some(ResolvedColumns {
        confirmed: confirmed?,
        deaths: deaths?,
        city: city?,
    })
}

/// Lowercase ASCII form of a name: accents are dropped and any run of other
/// characters becomes a single underscore.
///
/// ```
/// use sheet_validator::columns::slugify;
/// assert_eq!(slugify("Casos Confirmados"), "casos_confirmados");
/// assert_eq!(slugify(" Município "), "municipio");
/// ```
pub fn slugify(name: &str) -> String {
    let mut res = String::with_capacity(name.len());
    let mut pending_sep = false;
    for c in name.to_lowercase().chars().map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !res.is_empty() {
                res.push('_');
            }
            pending_sep = false;
            res.push(c);
        } else {
            pending_sep = true;
        }
    }
    res
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        _ => c,
    }
}
