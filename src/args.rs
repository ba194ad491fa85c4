use clap::Parser;

/// This is a validation program for the COVID-19 bulletins of the Brazilian states.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with all the settings of the validation.
    /// The other flags override the values it contains. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The spreadsheet to validate.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. By default, it is deduced from the extension of the file.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use. By default, the first one.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// The two-letter code of the state (UF).
    #[clap(short, long, value_parser)]
    pub state: Option<String>,

    /// The date of the bulletin, as YYYY-MM-DD.
    #[clap(short, long, value_parser)]
    pub date: Option<String>,

    /// (file path) The JSON registry of the states and cities.
    #[clap(long, value_parser)]
    pub cities: Option<String>,

    /// (file path, optional) The JSON list of the submissions accepted so far.
    #[clap(long, value_parser)]
    pub history: Option<String>,

    /// Do not check that the cases of the cities add up to the total.
    #[clap(long, takes_value = false)]
    pub skip_sum_cases: bool,

    /// Do not check that the deaths of the cities add up to the total.
    #[clap(long, takes_value = false)]
    pub skip_sum_deaths: bool,

    /// (file path, 'stdout' or empty) Where to write the validated records and warnings in JSON format.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected output in JSON format. If provided, the
    /// program checks that its output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
