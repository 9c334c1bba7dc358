// Primitives for reading Excel rosters through calamine.

use log::debug;
use snafu::prelude::*;

use calamine::{open_workbook, Reader, Xlsx};

use crate::stage::io_common::find_column;
use crate::stage::*;

/// The worksheet used when none is named explicitly.
pub const DEFAULT_WORKSHEET: &str = "Choir List";

pub fn read_members_excel(
    path: &str,
    worksheet: &Option<String>,
) -> StageResult<Vec<ParsedMember>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path.to_string(),
    })?;

    let sheet_name = worksheet
        .clone()
        .unwrap_or_else(|| DEFAULT_WORKSHEET.to_string());
    // Prefer the named worksheet, fall back to the first one.
    let wrange = match workbook.worksheet_range(sheet_name.as_str()) {
        Some(r) => r.context(OpeningExcelSnafu {
            path: path.to_string(),
        })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu {
                path: path.to_string(),
            })?
            .context(OpeningExcelSnafu {
                path: path.to_string(),
            })?,
    };

    let mut rows = wrange.rows();
    let header_row = rows.next().context(EmptyExcelSnafu {
        path: path.to_string(),
    })?;
    let header: Vec<String> = header_row.iter().map(cell_to_label).collect();
    debug!("read_members_excel: header: {:?}", header);

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
    for (idx, row) in rows.enumerate() {
        // The header occupies line 1.
        let lineno = idx + 2;
        debug!("read_members_excel: {:?} {:?}", lineno, row);
        let pm = ParsedMember {
            lineno,
            name: text_cell(row.get(name_idx), lineno)?,
            section: text_cell(row.get(section_idx), lineno)?,
            height: numeric_cell(height_idx.and_then(|i| row.get(i)), lineno)?,
            row: position_cell(row_idx.and_then(|i| row.get(i)), "Row", lineno)?,
            column: position_cell(column_idx.and_then(|i| row.get(i)), "Column", lineno)?,
        };
        res.push(pm);
    }
    Ok(res)
}

fn cell_to_label(cell: &calamine::DataType) -> String {
    match cell {
        calamine::DataType::String(s) => s.clone(),
        x => format!("{:?}", x),
    }
}

fn text_cell(cell: Option<&calamine::DataType>, lineno: usize) -> StageResult<Option<String>> {
    match cell {
        Some(calamine::DataType::String(s)) if s.trim().is_empty() => Ok(None),
        Some(calamine::DataType::String(s)) => Ok(Some(s.trim().to_string())),
        Some(calamine::DataType::Empty) | None => Ok(None),
        Some(x) => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

fn numeric_cell(cell: Option<&calamine::DataType>, lineno: usize) -> StageResult<Option<f64>> {
    match cell {
        Some(calamine::DataType::Float(f)) => Ok(Some(*f)),
        Some(calamine::DataType::Int(i)) => Ok(Some(*i as f64)),
        // Some spreadsheet programs format numbers as text.
        Some(calamine::DataType::String(s)) if s.trim().is_empty() => Ok(None),
        Some(calamine::DataType::String(s)) => match s.trim().parse::<f64>() {
            Ok(f) => Ok(Some(f)),
            Err(_) => ExcelWrongCellTypeSnafu {
                lineno,
                content: s.clone(),
            }
            .fail(),
        },
        Some(calamine::DataType::Empty) | None => Ok(None),
        Some(x) => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", x),
        }
        .fail(),
    }
}

// Positions must be whole numbers. Spreadsheet programs store them as
// floats, so "3.0" is fine; "2.7" is not a valid position.
fn position_cell(
    cell: Option<&calamine::DataType>,
    column: &str,
    lineno: usize,
) -> StageResult<Option<i64>> {
    match numeric_cell(cell, lineno)? {
        Some(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
        Some(f) => InvalidPositionSnafu {
            column: column.to_string(),
            lineno,
            content: f.to_string(),
        }
        .fail(),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::DataType;

    #[test]
    fn text_cells_are_trimmed_and_blanks_dropped() {
        assert_eq!(
            text_cell(Some(&DataType::String(" Alto ".to_string())), 2).unwrap(),
            Some("Alto".to_string())
        );
        assert_eq!(text_cell(Some(&DataType::Empty), 2).unwrap(), None);
        assert_eq!(text_cell(None, 2).unwrap(), None);
    }

    #[test]
    fn numeric_cells_accept_ints_floats_and_numeric_text() {
        assert_eq!(
            numeric_cell(Some(&DataType::Float(150.5)), 2).unwrap(),
            Some(150.5)
        );
        assert_eq!(
            numeric_cell(Some(&DataType::Int(160)), 2).unwrap(),
            Some(160.0)
        );
        assert_eq!(
            numeric_cell(Some(&DataType::String("170".to_string())), 2).unwrap(),
            Some(170.0)
        );
    }

    #[test]
    fn fractional_position_cells_are_not_truncated() {
        assert_eq!(
            position_cell(Some(&DataType::Float(3.0)), "Row", 2).unwrap(),
            Some(3)
        );
        assert_eq!(position_cell(Some(&DataType::Empty), "Row", 2).unwrap(), None);
        let res = position_cell(Some(&DataType::Float(2.7)), "Row", 5);
        match res {
            Err(StageError::InvalidPosition {
                column,
                lineno,
                content,
            }) => {
                assert_eq!(column, "Row");
                assert_eq!(lineno, 5);
                assert_eq!(content, "2.7");
            }
            x => panic!("unexpected result: {:?}", x),
        }
    }

    #[test]
    fn non_numeric_height_is_reported_with_its_line() {
        let res = numeric_cell(Some(&DataType::String("tall".to_string())), 7);
        match res {
            Err(StageError::ExcelWrongCellType { lineno, content }) => {
                assert_eq!(lineno, 7);
                assert_eq!(content, "tall");
            }
            x => panic!("unexpected result: {:?}", x),
        }
    }
}
