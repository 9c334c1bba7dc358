use snafu::prelude::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

use stage_layout::{Palette, Section, ShortRosterMode};
use std::fs;

use crate::stage::*;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "ensembleName")]
    pub ensemble_name: String,
    #[serde(rename = "outputPath")]
    pub output_path: Option<String>,
    #[serde(rename = "chartPath")]
    pub chart_path: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RosterFileSource {
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "worksheetName")]
    pub worksheet_name: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct PaletteEntry {
    pub section: String,
    pub color: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StageRules {
    #[serde(rename = "numRows")]
    _num_rows: Option<JSValue>,
    #[serde(rename = "shortRosterMode")]
    _short_roster_mode: Option<String>,
    #[serde(rename = "fallbackColor")]
    pub fallback_color: Option<String>,
    pub palette: Option<Vec<PaletteEntry>>,
}

impl StageRules {
    pub fn num_rows(&self) -> StageResult<Option<u32>> {
        match &self._num_rows {
            Some(_) => read_js_int(&self._num_rows).map(|x| Some(x as u32)),
            None => Ok(None),
        }
    }

    pub fn short_roster_mode(&self) -> StageResult<Option<ShortRosterMode>> {
        match self._short_roster_mode.as_deref() {
            Some("reject") => Ok(Some(ShortRosterMode::Reject)),
            Some("shrinkRows") => Ok(Some(ShortRosterMode::ShrinkRows)),
            Some(x) => whatever!("unknown short roster mode: {}", x),
            None => Ok(None),
        }
    }

    /// The palette described by the configuration, or the default one when
    /// no entries are listed.
    pub fn palette(&self) -> Palette {
        let fallback = self
            .fallback_color
            .clone()
            .unwrap_or_else(|| Palette::default().fallback_color().to_string());
        match &self.palette {
            Some(entries) => Palette::new(
                entries
                    .iter()
                    .map(|e| (Section::from_label(&e.section), e.color.clone()))
                    .collect(),
                fallback,
            ),
            None => Palette::new(Palette::default().entries().to_vec(), fallback),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    #[serde(rename = "outputSettings")]
    pub output_settings: OutputSettings,
    #[serde(rename = "rosterFileSources")]
    pub roster_file_sources: Vec<RosterFileSource>,
    pub rules: Option<StageRules>,
}

pub fn read_config(path: &str) -> StageResult<StageConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {
        path: path.to_string(),
    })?;
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})
}

fn read_js_int(x: &Option<JSValue>) -> StageResult<usize> {
    match x {
        Some(JSValue::Number(n)) => n
            .as_u64()
            .map(|x| x as usize)
            .context(ParsingJsonNumberSnafu {}),
        Some(JSValue::String(s)) => s.parse::<usize>().ok().context(ParsingJsonNumberSnafu {}),
        _ => None.context(ParsingJsonNumberSnafu {}),
    }
}
