use crate::sheet::*;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;
use sheet_validator::store::{AcceptedSubmissions, CityRegistry};

/// The settings that may be stored in a configuration file.
/// Every one of them may also be given on the command line.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetConfig {
    pub state: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    pub provider: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "citiesFile")]
    pub cities_file: Option<String>,
    #[serde(rename = "historyFile")]
    pub history_file: Option<String>,
    #[serde(rename = "skipSumCases")]
    pub skip_sum_cases: Option<bool>,
    #[serde(rename = "skipSumDeaths")]
    pub skip_sum_deaths: Option<bool>,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> SheetResult<T> {
    let path_s = path.display().to_string();
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path_s.clone(),
    })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path: path_s })
}

pub fn read_config(path: &Path) -> SheetResult<SheetConfig> {
    read_json(path)
}

pub fn read_registry(path: &Path) -> SheetResult<CityRegistry> {
    let registry: CityRegistry = read_json(path)?;
    debug!(
        "read_registry: {:?}: {} states, {} cities",
        path,
        registry.states.len(),
        registry.cities.len()
    );
    Ok(registry)
}

pub fn read_history(path: &Path) -> SheetResult<AcceptedSubmissions> {
    let submissions: Vec<Submission> = read_json(path)?;
    debug!("read_history: {:?}: {} submissions", path, submissions.len());
    Ok(AcceptedSubmissions::new(submissions))
}

pub fn read_summary(path: &Path) -> SheetResult<JSValue> {
    read_json(path)
}
