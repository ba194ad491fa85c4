use log::{debug, info, warn};

use chrono::NaiveDate;
use serde_json::json;
use serde_json::Value as JSValue;
use sheet_validator::store::AcceptedSubmissions;
use sheet_validator::*;
use snafu::{prelude::*, Snafu};
use std::fs;
use std::path::{Path, PathBuf};
use text_diff::print_diff;

use crate::args::Args;
use crate::sheet::config_reader::*;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum SheetError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The workbook {path} has no worksheet or an empty worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno} of the CSV file"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing file {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Missing setting '{name}': it must be given on the command line or in the configuration file"))]
    MissingSetting { name: String },
    #[snafu(display("Invalid date {date}, expected YYYY-MM-DD"))]
    InvalidDate {
        source: chrono::ParseError,
        date: String,
    },
    #[snafu(display("The spreadsheet was rejected: {source}"))]
    Rejected { source: ValidationErrors },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provider {
    Csv,
    Xlsx,
}

/// All the settings of one validation, once the command line and the
/// configuration file have been merged.
#[derive(PartialEq, Debug, Clone)]
pub struct Settings {
    pub state: String,
    pub date: NaiveDate,
    pub input: PathBuf,
    pub provider: Provider,
    pub excel_worksheet_name: Option<String>,
    pub cities: PathBuf,
    pub history: Option<PathBuf>,
    pub options: ValidationOptions,
}

fn resolve_settings(args: &Args) -> SheetResult<Settings> {
    let (config, root) = match args.config.as_ref() {
        Some(p) => {
            let config_p = Path::new(p);
            let root = config_p.parent().map(|x| x.to_path_buf()).unwrap_or_default();
            (read_config(config_p)?, root)
        }
        None => (SheetConfig::default(), PathBuf::new()),
    };
    debug!("resolve_settings: config: {:?} root: {:?}", config, root);
    // The paths of the configuration file are relative to it.
    let from_config = |x: &Option<String>| x.as_ref().map(|s| root.join(s));

    let state = args
        .state
        .clone()
        .or_else(|| config.state.clone())
        .context(MissingSettingSnafu { name: "state" })?
        .to_uppercase();
    let date_s = args
        .date
        .clone()
        .or_else(|| config.date.clone())
        .context(MissingSettingSnafu { name: "date" })?;
    let date = NaiveDate::parse_from_str(&date_s, "%Y-%m-%d")
        .context(InvalidDateSnafu { date: date_s.clone() })?;
    let input = args
        .input
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| from_config(&config.file_path))
        .context(MissingSettingSnafu { name: "input" })?;
    let provider_name = args.input_type.clone().or_else(|| config.provider.clone());
    let provider = get_provider(provider_name.as_deref(), &input)?;
    let cities = args
        .cities
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| from_config(&config.cities_file))
        .context(MissingSettingSnafu { name: "cities" })?;
    let history = args
        .history
        .as_ref()
        .map(PathBuf::from)
        .or_else(|| from_config(&config.history_file));

    Ok(Settings {
        state,
        date,
        input,
        provider,
        excel_worksheet_name: args
            .excel_worksheet_name
            .clone()
            .or_else(|| config.excel_worksheet_name.clone()),
        cities,
        history,
        options: ValidationOptions {
            skip_sum_cases: args.skip_sum_cases || config.skip_sum_cases.unwrap_or(false),
            skip_sum_deaths: args.skip_sum_deaths || config.skip_sum_deaths.unwrap_or(false),
        },
    })
}

fn get_provider(name: Option<&str>, input: &Path) -> SheetResult<Provider> {
    let name = match name {
        Some(n) => n.to_lowercase(),
        None => input
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("csv")
            .to_lowercase(),
    };
    match name.as_str() {
        "csv" => Ok(Provider::Csv),
        "xlsx" => Ok(Provider::Xlsx),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

fn read_table(settings: &Settings) -> SheetResult<TabularInput> {
    info!(
        "Attempting to read spreadsheet {:?} ({:?})",
        settings.input, settings.provider
    );
    match settings.provider {
        Provider::Csv => io_csv::read_csv_table(&settings.input),
        Provider::Xlsx => {
            io_xlsx::read_xlsx_table(&settings.input, settings.excel_worksheet_name.as_deref())
        }
    }
}

fn build_summary_js(outcome: &ValidationOutcome) -> JSValue {
    json!({
        "records": outcome.records,
        "warnings": outcome.warnings,
    })
}

fn write_output(out: Option<&str>, content: &str) -> SheetResult<()> {
    match out {
        None | Some("") | Some("stdout") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing output to {}", path);
            fs::write(path, content).context(WritingOutputSnafu { path })
        }
    }
}

/// Runs a full validation: reads all the inputs, validates the spreadsheet
/// and writes the outcome.
pub fn run_validation(args: &Args) -> SheetResult<ValidationOutcome> {
    let settings = resolve_settings(args)?;
    info!("settings: {:?}", settings);

    let table = read_table(&settings)?;
    let registry = read_registry(&settings.cities)?;
    let history = match settings.history.as_ref() {
        Some(p) => read_history(p)?,
        None => AcceptedSubmissions::default(),
    };

    let outcome = validate_spreadsheet(
        &table,
        settings.date,
        &settings.state,
        &settings.options,
        &registry,
        &history,
    )
    .context(RejectedSnafu {})?;

    for w in outcome.warnings.iter() {
        warn!("{}", w);
    }

    let result_js = build_summary_js(&outcome);
    let pretty_js_stats = serde_json::to_string_pretty(&result_js).context(ParsingJsonSnafu {
        path: args.out.clone().unwrap_or_default(),
    })?;
    write_output(args.out.as_deref(), &pretty_js_stats)?;

    // The reference output, if provided for comparison
    if let Some(summary_p) = args.reference.as_ref() {
        let summary_ref = read_summary(Path::new(summary_p))?;
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {
                path: summary_p.clone(),
            })?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference output");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between the output and the reference output")
        }
    }

    Ok(outcome)
}
