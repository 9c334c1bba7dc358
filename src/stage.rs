use log::info;

use snafu::{prelude::*, Snafu};
use stage_layout::*;

use std::fs;

use text_diff::print_diff;

use crate::args::Args;
use crate::stage::config_reader::*;
use crate::stage::render::StageChart;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_excel;
pub mod io_fixed;
pub mod render;

#[derive(Debug, Snafu)]
pub enum StageError {
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No readable worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    CsvOpen { source: csv::Error, path: String },
    #[snafu(display("Error reading a CSV record"))]
    CsvLineParse { source: csv::Error },
    #[snafu(display("Error writing a CSV record"))]
    CsvWrite { source: csv::Error },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Could not read a number from the JSON configuration"))]
    ParsingJsonNumber {},
    #[snafu(display("Missing column {column} in {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Line {lineno}: missing value for {column}"))]
    MissingCell { column: String, lineno: usize },
    #[snafu(display("Line {lineno}: could not understand cell {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Line {lineno}: {column} must be a positive integer, got {content}"))]
    InvalidPosition {
        column: String,
        lineno: usize,
        content: String,
    },
    #[snafu(display("Could not compute the layout: {source}"))]
    Layout { source: LayoutErrors },
    #[snafu(display("Error writing output file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading reference file {path}"))]
    ReadingReference {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type StageResult<T> = Result<T, StageError>;

/// A member row, as parsed by the readers.
/// This is before checking which fields are required for the requested
/// placement mode. The line number refers to the source file and is only
/// used for diagnostics.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedMember {
    pub lineno: usize,
    pub name: Option<String>,
    pub section: Option<String>,
    pub height: Option<f64>,
    pub row: Option<i64>,
    pub column: Option<i64>,
}

/// One input file, as selected by the configuration or the command line.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SourceSpec {
    pub provider: String,
    pub path: String,
    pub worksheet: Option<String>,
}

impl SourceSpec {
    pub fn is_fixed(&self) -> bool {
        self.provider.starts_with("fixed")
    }
}

/// Everything one invocation needs, after merging the configuration file
/// and the command line flags.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RunSettings {
    pub sources: Vec<SourceSpec>,
    pub layout: LayoutConfig,
    pub palette: Palette,
    pub out: Option<String>,
    pub chart: Option<String>,
    pub reference: Option<String>,
}

/// Entry point of the command line program.
pub fn run(args: &Args) -> StageResult<()> {
    let settings = assemble_settings(args)?;
    info!("run: settings: {:?}", settings);
    run_stage_chart(&settings)
}

fn assemble_settings(args: &Args) -> StageResult<RunSettings> {
    let config: Option<StageConfig> = match &args.config {
        Some(p) => Some(read_config(p)?),
        None => None,
    };

    let mut sources: Vec<SourceSpec> = match &config {
        Some(c) => c
            .roster_file_sources
            .iter()
            .map(|fs| SourceSpec {
                provider: fs.provider.clone(),
                path: fs.file_path.clone(),
                worksheet: fs.worksheet_name.clone(),
            })
            .collect(),
        None => Vec::new(),
    };
    // An explicit input on the command line replaces the configured sources.
    if let Some(input) = &args.input {
        sources = vec![SourceSpec {
            provider: args
                .input_type
                .clone()
                .unwrap_or_else(|| "excel".to_string()),
            path: input.clone(),
            worksheet: args.excel_worksheet_name.clone(),
        }];
    }
    if sources.is_empty() {
        whatever!("No input file. Pass one with --input or list rosterFileSources in the configuration.");
    }

    let rules = config.as_ref().and_then(|c| c.rules.clone());
    let mut layout = LayoutConfig::DEFAULT_CONFIG;
    if let Some(r) = &rules {
        if let Some(n) = r.num_rows()? {
            layout.num_rows = n;
        }
        if let Some(m) = r.short_roster_mode()? {
            layout.short_roster_mode = m;
        }
    }
    if let Some(n) = args.rows {
        layout.num_rows = n;
    }

    let palette = match &rules {
        Some(r) => r.palette(),
        None => Palette::default(),
    };

    let out = args
        .out
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.output_settings.output_path.clone()));
    let chart = args
        .chart
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.output_settings.chart_path.clone()));

    Ok(RunSettings {
        sources,
        layout,
        palette,
        out,
        chart,
        reference: args.reference.clone(),
    })
}

/// Runs one invocation: read, place, export, render, compare.
/// No partial output is produced: the first error aborts the run before
/// anything is written.
pub fn run_stage_chart(settings: &RunSettings) -> StageResult<()> {
    let all_fixed = settings.sources.iter().all(|s| s.is_fixed());
    let all_computed = settings.sources.iter().all(|s| !s.is_fixed());
    if !all_fixed && !all_computed {
        whatever!("Cannot mix fixed-layout and height-based sources in one run");
    }

    let mut parsed: Vec<ParsedMember> = Vec::new();
    for source in settings.sources.iter() {
        let mut file_data = read_parsed_members(source)?;
        parsed.append(&mut file_data);
    }

    let placements: Vec<PlacedMember> = if all_fixed {
        validate_fixed(&parsed)?
    } else {
        let members = validate_roster(&parsed)?;
        let outcome =
            assign_stage_positions(&members, &settings.layout).context(LayoutSnafu)?;
        info!("run_stage_chart: row sizes: {:?}", outcome.row_sizes);
        outcome.placements
    };

    let csv_text = io_csv::write_layout_csv(&placements, &settings.palette)?;

    if let Some(out) = &settings.out {
        match out.as_str() {
            "stdout" => print!("{}", csv_text),
            p if p.ends_with(".json") => {
                let js_text = io_fixed::write_fixed_json(&placements)?;
                fs::write(p, js_text).context(WritingOutputSnafu { path: p.to_string() })?;
            }
            p => {
                fs::write(p, &csv_text).context(WritingOutputSnafu { path: p.to_string() })?;
            }
        }
    }

    if let Some(chart_path) = &settings.chart {
        let svg = StageChart::default().render(&placements, &settings.palette);
        fs::write(chart_path, svg).context(WritingOutputSnafu {
            path: chart_path.clone(),
        })?;
        info!("run_stage_chart: chart written to {}", chart_path);
    }

    // The reference layout, if provided for comparison
    if let Some(reference_path) = &settings.reference {
        let reference = fs::read_to_string(reference_path).context(ReadingReferenceSnafu {
            path: reference_path.clone(),
        })?;
        if reference != csv_text {
            print_diff(reference.as_str(), csv_text.as_str(), "\n");
            whatever!("Difference detected between computed layout and reference layout")
        }
    }

    Ok(())
}

fn read_parsed_members(source: &SourceSpec) -> StageResult<Vec<ParsedMember>> {
    info!("Attempting to read roster file {:?}", source.path);
    match source.provider.as_str() {
        "excel" | "fixed_excel" => io_excel::read_members_excel(&source.path, &source.worksheet),
        "csv" | "fixed_csv" => io_csv::read_members_csv(&source.path),
        "fixed_json" => io_fixed::read_fixed_json(&source.path),
        x => whatever!("Provider not implemented {:?}", x),
    }
}

/// Checks the fields needed for height-based placement.
pub fn validate_roster(parsed: &[ParsedMember]) -> StageResult<Vec<Member>> {
    let mut res: Vec<Member> = Vec::new();
    for pm in parsed.iter() {
        let name = non_blank(&pm.name).context(MissingCellSnafu {
            column: "Name".to_string(),
            lineno: pm.lineno,
        })?;
        let section = non_blank(&pm.section).context(MissingCellSnafu {
            column: "Section".to_string(),
            lineno: pm.lineno,
        })?;
        let height = pm.height.context(MissingCellSnafu {
            column: "Height".to_string(),
            lineno: pm.lineno,
        })?;
        res.push(Member {
            name,
            section: Section::from_label(&section),
            height: Some(height),
        });
    }
    Ok(res)
}

/// Checks the fields needed for the fixed-layout path. The positions are
/// taken verbatim, nothing is recomputed.
pub fn validate_fixed(parsed: &[ParsedMember]) -> StageResult<Vec<PlacedMember>> {
    let mut res: Vec<PlacedMember> = Vec::new();
    for pm in parsed.iter() {
        let name = non_blank(&pm.name).context(MissingCellSnafu {
            column: "Name".to_string(),
            lineno: pm.lineno,
        })?;
        let section = non_blank(&pm.section).context(MissingCellSnafu {
            column: "Section".to_string(),
            lineno: pm.lineno,
        })?;
        let row = read_position(pm.row, "Row", pm.lineno)?;
        let column = read_position(pm.column, "Column", pm.lineno)?;
        res.push(PlacedMember {
            name,
            section: Section::from_label(&section),
            row,
            column,
        });
    }
    Ok(res)
}

fn read_position(value: Option<i64>, column: &str, lineno: usize) -> StageResult<u32> {
    match value {
        Some(x) if x >= 1 => Ok(x as u32),
        Some(x) => InvalidPositionSnafu {
            column: column.to_string(),
            lineno,
            content: x.to_string(),
        }
        .fail(),
        None => MissingCellSnafu {
            column: column.to_string(),
            lineno,
        }
        .fail(),
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(name: &str, section: &str, height: Option<f64>, lineno: usize) -> ParsedMember {
        ParsedMember {
            lineno,
            name: Some(name.to_string()),
            section: Some(section.to_string()),
            height,
            row: None,
            column: None,
        }
    }

    #[test]
    fn roster_validation_requires_heights() {
        let rows = vec![
            parsed("Ann Smith", "Soprano", Some(150.0), 2),
            parsed("Ben Ode", "Alto", None, 3),
        ];
        let res = validate_roster(&rows);
        match res {
            Err(StageError::MissingCell { column, lineno }) => {
                assert_eq!(column, "Height");
                assert_eq!(lineno, 3);
            }
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn roster_validation_requires_sections() {
        let rows = vec![ParsedMember {
            lineno: 2,
            name: Some("Ann Smith".to_string()),
            section: Some("  ".to_string()),
            height: Some(150.0),
            row: None,
            column: None,
        }];
        let res = validate_roster(&rows);
        match res {
            Err(StageError::MissingCell { column, lineno }) => {
                assert_eq!(column, "Section");
                assert_eq!(lineno, 2);
            }
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn fixed_validation_rejects_non_positive_positions() {
        let rows = vec![ParsedMember {
            lineno: 4,
            name: Some("Ann Smith".to_string()),
            section: Some("Soprano".to_string()),
            height: None,
            row: Some(0),
            column: Some(1),
        }];
        let res = validate_fixed(&rows);
        match res {
            Err(StageError::InvalidPosition {
                column,
                lineno,
                content,
            }) => {
                assert_eq!(column, "Row");
                assert_eq!(lineno, 4);
                assert_eq!(content, "0");
            }
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn fixed_validation_keeps_positions_verbatim() {
        let rows = vec![ParsedMember {
            lineno: 2,
            name: Some("Ann Smith".to_string()),
            section: Some("Baritone".to_string()),
            height: None,
            row: Some(3),
            column: Some(2),
        }];
        let placed = validate_fixed(&rows).unwrap();
        assert_eq!(
            placed,
            vec![PlacedMember {
                name: "Ann Smith".to_string(),
                section: Section::Other("Baritone".to_string()),
                row: 3,
                column: 2,
            }]
        );
    }

    #[test]
    fn csv_export_round_trips_through_the_fixed_loader() {
        let placements = vec![
            PlacedMember {
                name: "Ann Smith".to_string(),
                section: Section::Soprano,
                row: 1,
                column: 1,
            },
            PlacedMember {
                name: "Ben Ode".to_string(),
                section: Section::Other("Baritone".to_string()),
                row: 2,
                column: 1,
            },
        ];
        let csv_text = io_csv::write_layout_csv(&placements, &Palette::default()).unwrap();

        let path = std::env::temp_dir().join("choirstage_roundtrip_test.csv");
        let path_s = path.to_str().unwrap().to_string();
        fs::write(&path, csv_text).unwrap();

        let parsed = io_csv::read_members_csv(&path_s).unwrap();
        let reloaded = validate_fixed(&parsed).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(reloaded, placements);
    }

    #[test]
    fn json_export_round_trips_through_the_fixed_loader() {
        let placements = vec![PlacedMember {
            name: "Eva Ray".to_string(),
            section: Section::Alto,
            row: 2,
            column: 3,
        }];
        let js_text = io_fixed::write_fixed_json(&placements).unwrap();

        let path = std::env::temp_dir().join("choirstage_roundtrip_test.json");
        let path_s = path.to_str().unwrap().to_string();
        fs::write(&path, js_text).unwrap();

        let parsed = io_fixed::read_fixed_json(&path_s).unwrap();
        let reloaded = validate_fixed(&parsed).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(reloaded, placements);
    }

    #[test]
    fn divergent_reference_layout_fails_the_run() {
        let roster = "Name,Section,Height\n\
            Ann Smith,Soprano,150\n\
            Ben Ode,Alto,160\n";
        let in_path = std::env::temp_dir().join("choirstage_ref_roster.csv");
        let ref_path = std::env::temp_dir().join("choirstage_ref_layout.csv");
        fs::write(&in_path, roster).unwrap();

        let settings = |reference: Option<String>| RunSettings {
            sources: vec![SourceSpec {
                provider: "csv".to_string(),
                path: in_path.to_str().unwrap().to_string(),
                worksheet: None,
            }],
            layout: LayoutConfig {
                num_rows: 2,
                short_roster_mode: ShortRosterMode::Reject,
            },
            palette: Palette::default(),
            out: None,
            chart: None,
            reference,
        };

        // A reference that matches the computed layout passes.
        let expected = "Name,Section,Row,Column,Color\n\
            Ann Smith,Soprano,1,1,red\n\
            Ben Ode,Alto,2,1,blue\n";
        fs::write(&ref_path, expected).unwrap();
        run_stage_chart(&settings(Some(ref_path.to_str().unwrap().to_string()))).unwrap();

        // A reference with a swapped position fails the run.
        let divergent = "Name,Section,Row,Column,Color\n\
            Ann Smith,Soprano,2,1,red\n\
            Ben Ode,Alto,1,1,blue\n";
        fs::write(&ref_path, divergent).unwrap();
        let res = run_stage_chart(&settings(Some(ref_path.to_str().unwrap().to_string())));
        fs::remove_file(&in_path).unwrap();
        fs::remove_file(&ref_path).unwrap();
        assert!(matches!(res, Err(StageError::Whatever { .. })));
    }

    #[test]
    fn end_to_end_from_a_csv_roster() {
        let roster = "Name,Section,Height\n\
            Ann Smith,Soprano,150\n\
            Ben Ode,Alto,160\n\
            Cam Fox,Tenor,170\n\
            Dan Wu,Bass,180\n\
            Eva Ray,Soprano,190\n";
        let in_path = std::env::temp_dir().join("choirstage_e2e_roster.csv");
        let out_path = std::env::temp_dir().join("choirstage_e2e_layout.csv");
        let chart_path = std::env::temp_dir().join("choirstage_e2e_chart.svg");
        fs::write(&in_path, roster).unwrap();

        let settings = RunSettings {
            sources: vec![SourceSpec {
                provider: "csv".to_string(),
                path: in_path.to_str().unwrap().to_string(),
                worksheet: None,
            }],
            layout: LayoutConfig::DEFAULT_CONFIG,
            palette: Palette::default(),
            out: Some(out_path.to_str().unwrap().to_string()),
            chart: Some(chart_path.to_str().unwrap().to_string()),
            reference: None,
        };
        run_stage_chart(&settings).unwrap();

        let exported = fs::read_to_string(&out_path).unwrap();
        assert!(exported.starts_with("Name,Section,Row,Column,Color"));
        assert!(exported.contains("Eva Ray,Soprano,3,1,red"));
        let svg = fs::read_to_string(&chart_path).unwrap();
        assert!(svg.contains("<svg"));

        fs::remove_file(&in_path).unwrap();
        fs::remove_file(&out_path).unwrap();
        fs::remove_file(&chart_path).unwrap();
    }
}
