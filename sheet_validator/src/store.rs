use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::columns::slugify;
use crate::config::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StateRecord {
    pub state: String,
    #[serde(rename = "stateIbgeCode")]
    pub state_ibge_code: u32,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct CityRecord {
    pub state: String,
    pub city: String,
    #[serde(rename = "cityIbgeCode")]
    pub city_ibge_code: u32,
}

/// The list of the known states and cities.
///
/// Cities are matched on their slug, so that the spelling in the spreadsheet
/// does not need to follow the official one to the accent.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct CityRegistry {
    pub states: Vec<StateRecord>,
    pub cities: Vec<CityRecord>,
}

impl CityLookup for CityRegistry {
    fn city_info(&self, city: &str, state: &str) -> CityInfo {
        let slug = slugify(city);
        self.cities
            .iter()
            .find(|c| c.state == state && slugify(&c.city) == slug)
            .map(|c| CityInfo::Found {
                city_ibge_code: c.city_ibge_code,
                city: c.city.clone(),
            })
            .unwrap_or(CityInfo::NotFound)
    }

    fn state_info(&self, state: &str) -> Option<StateInfo> {
        self.states
            .iter()
            .find(|s| s.state == state)
            .map(|s| StateInfo {
                state_ibge_code: s.state_ibge_code,
            })
    }
}

/// The submissions accepted so far, for all the states.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct AcceptedSubmissions {
    submissions: Vec<Submission>,
}

impl AcceptedSubmissions {
    pub fn new(submissions: Vec<Submission>) -> AcceptedSubmissions {
        AcceptedSubmissions { submissions }
    }

    pub fn accept(&mut self, submission: Submission) {
        self.submissions.push(submission);
    }
}

impl HistoricalStore for AcceptedSubmissions {
    fn most_recent_before(&self, state: &str, date: NaiveDate) -> Option<Submission> {
        self.submissions
            .iter()
            .filter(|s| s.state == state && s.date < date)
            .max_by_key(|s| s.date)
            .cloned()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn registry() -> CityRegistry {
        let city = |name: &str, code: u32| CityRecord {
            state: "PR".to_string(),
            city: name.to_string(),
            city_ibge_code: code,
        };
        CityRegistry {
            states: vec![
                StateRecord {
                    state: "PR".to_string(),
                    state_ibge_code: 41,
                },
                StateRecord {
                    state: "SP".to_string(),
                    state_ibge_code: 35,
                },
            ],
            cities: vec![
                city("Curitiba", 4106902),
                city("Londrina", 4113700),
                city("Maringá", 4115200),
                city("Cascavel", 4104808),
                CityRecord {
                    state: "SP".to_string(),
                    city: "Campinas".to_string(),
                    city_ibge_code: 3509502,
                },
            ],
        }
    }

    #[test]
    fn city_lookup() {
        let reg = registry();
        assert_eq!(
            reg.city_info("maringa", "PR"),
            CityInfo::Found {
                city_ibge_code: 4115200,
                city: "Maringá".to_string()
            }
        );
        assert_eq!(reg.city_info("Campinas", "PR"), CityInfo::NotFound);
        assert_eq!(
            reg.state_info("SP"),
            Some(StateInfo {
                state_ibge_code: 35
            })
        );
        assert_eq!(reg.state_info("XX"), None);
    }

    #[test]
    fn registry_from_json() {
        let js = r#"{
            "states": [{"state": "PR", "stateIbgeCode": 41}],
            "cities": [{"state": "PR", "city": "Curitiba", "cityIbgeCode": 4106902}]
        }"#;
        let reg: CityRegistry = serde_json::from_str(js).unwrap();
        assert_eq!(reg.state_info("PR").map(|s| s.state_ibge_code), Some(41));
        assert!(matches!(
            reg.city_info("CURITIBA", "PR"),
            CityInfo::Found { city_ibge_code: 4106902, .. }
        ));
    }

    #[test]
    fn most_recent_strictly_before() {
        let day = |d: u32| NaiveDate::from_ymd_opt(2020, 5, d).unwrap();
        let mut store = AcceptedSubmissions::default();
        store.accept(Submission::new("PR", day(1)));
        store.accept(Submission::new("PR", day(3)));
        store.accept(Submission::new("PR", day(5)));
        store.accept(Submission::new("SP", day(4)));

        let found = store.most_recent_before("PR", day(5)).map(|s| s.date);
        assert_eq!(found, Some(day(3)));
        assert_eq!(store.most_recent_before("PR", day(1)), None);
        assert_eq!(
            store.most_recent_before("SP", day(30)).map(|s| s.state),
            Some("SP".to_string())
        );
    }
}
