use clap::Parser;

/// This program extracts the results of every council from an election results worksheet.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The Excel file (.xlsx, .xls, .xlsb or .ods) containing the election results.
    /// Setting this option overrides what may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (file path, optional) A JSON file describing the input, the parsing rules and the output.
    /// For more information about the file format, read the manual of the council_results crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (default: first worksheet) The name of the worksheet to read.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the report will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference report in JSON format. If provided, councilreport will
    /// check that the report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, the parties that received no vote are kept in the tables.
    #[clap(long, takes_value = false)]
    pub keep_zero_votes: bool,

    /// (number, optional) Ignores the section titles numbered above this value.
    #[clap(long, value_parser)]
    pub max_section_number: Option<u64>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
