// Primitives for reading and writing CSV files.

use log::debug;
use snafu::prelude::*;

use stage_layout::{Palette, PlacedMember};

use crate::stage::io_common::{find_column, non_blank_cell, parse_numeric_cell, parse_position_cell};
use crate::stage::*;

pub fn read_members_csv(path: &str) -> StageResult<Vec<ParsedMember>> {
    let mut rdr = csv::Reader::from_path(path).context(CsvOpenSnafu {
        path: path.to_string(),
    })?;

    let header: Vec<String> = rdr
        .headers()
        .context(CsvLineParseSnafu {})?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_members_csv: header: {:?}", header);

    let name_idx = find_column(&header, "Name").context(MissingColumnSnafu {
        column: "Name".to_string(),
        path: path.to_string(),
    })?;
    let section_idx = find_column(&header, "Section").context(MissingColumnSnafu {
        column: "Section".to_string(),
        path: path.to_string(),
    })?;
    let height_idx = find_column(&header, "Height");
    let row_idx = find_column(&header, "Row");
    let column_idx = find_column(&header, "Column");

    let mut res: Vec<ParsedMember> = Vec::new();
    for (idx, line_r) in rdr.records().enumerate() {
        // The header occupies line 1.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_members_csv: {:?} {:?}", lineno, line);
        let pm = ParsedMember {
            lineno,
            name: non_blank_cell(line.get(name_idx)),
            section: non_blank_cell(line.get(section_idx)),
            height: height_idx.and_then(|i| parse_numeric_cell(line.get(i))),
            row: position_cell(row_idx.and_then(|i| line.get(i)), "Row", lineno)?,
            column: position_cell(column_idx.and_then(|i| line.get(i)), "Column", lineno)?,
        };
        res.push(pm);
    }
    Ok(res)
}

fn position_cell(value: Option<&str>, column: &str, lineno: usize) -> StageResult<Option<i64>> {
    match parse_position_cell(value) {
        Ok(x) => Ok(x),
        Err(content) => InvalidPositionSnafu {
            column: column.to_string(),
            lineno,
            content,
        }
        .fail(),
    }
}

/// Renders the layout as a CSV table with the columns Name, Section, Row,
/// Column and Color. The table can be re-loaded with the fixed_csv provider.
pub fn write_layout_csv(placements: &[PlacedMember], palette: &Palette) -> StageResult<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["Name", "Section", "Row", "Column", "Color"])
        .context(CsvWriteSnafu {})?;
    for p in placements.iter() {
        wtr.write_record([
            p.name.as_str(),
            p.section.label(),
            p.row.to_string().as_str(),
            p.column.to_string().as_str(),
            palette.color_for(&p.section),
        ])
        .context(CsvWriteSnafu {})?;
    }
    let bytes = match wtr.into_inner() {
        Ok(b) => b,
        Err(e) => whatever!("Could not flush the CSV output: {}", e),
    };
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => whatever!("The CSV output is not valid UTF-8: {}", e),
    }
}
