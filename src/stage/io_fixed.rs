// The structured JSON form of a fixed layout: one record per member with
// name, section, row and column fields. This is the save format for
// arrangements that were adjusted by hand and need to be re-rendered later.

use snafu::prelude::*;

use serde::{Deserialize, Serialize};
use stage_layout::PlacedMember;
use std::fs;

use crate::stage::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FixedLayoutEntry {
    pub name: String,
    pub section: String,
    pub row: i64,
    pub column: i64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FixedLayoutFile {
    pub members: Vec<FixedLayoutEntry>,
}

pub fn read_fixed_json(path: &str) -> StageResult<Vec<ParsedMember>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    let file: FixedLayoutFile =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;

    let res: Vec<ParsedMember> = file
        .members
        .iter()
        .enumerate()
        .map(|(idx, e)| ParsedMember {
            lineno: idx + 1,
            name: Some(e.name.clone()),
            section: Some(e.section.clone()),
            height: None,
            row: Some(e.row),
            column: Some(e.column),
        })
        .collect();
    Ok(res)
}

pub fn write_fixed_json(placements: &[PlacedMember]) -> StageResult<String> {
    let file = FixedLayoutFile {
        members: placements
            .iter()
            .map(|p| FixedLayoutEntry {
                name: p.name.clone(),
                section: p.section.label().to_string(),
                row: p.row as i64,
                column: p.column as i64,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&file).context(ParsingJsonSnafu {})
}
