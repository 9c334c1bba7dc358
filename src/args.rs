use clap::Parser;

/// This program computes and renders stage placement charts for choirs.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the input
    /// files, the layout rules and the palette. Command line flags override
    /// the values it contains.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path) The roster to place. For height-based placement the file
    /// needs Name, Section and Height columns; for a fixed layout it needs
    /// Name, Section, Row and Column.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default excel) The type of the input: excel, csv, fixed_excel,
    /// fixed_csv or fixed_json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// The number of stage rows to fill. The front row is row 1.
    #[clap(short, long, value_parser)]
    pub rows: Option<u32>,

    /// (file path or 'stdout') If specified, the computed layout is written
    /// as a CSV table (Name, Section, Row, Column, Color) to the given
    /// location. This table can be re-rendered later with --input-type
    /// fixed_csv. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) If specified, the stage chart is written as an SVG
    /// document to the given location.
    #[clap(long, value_parser)]
    pub chart: Option<String>,

    /// (file path) A reference CSV export. If provided, choirstage will
    /// check that the computed layout matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    /// (default Choir List) When using an Excel file, indicates the name of
    /// the worksheet to use. Falls back to the first worksheet when the
    /// named one does not exist.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
