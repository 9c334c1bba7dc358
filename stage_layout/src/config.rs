// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// A choir voice part.
///
/// The four standard parts are recognized by label. Anything else is kept
/// as-is under `Other` and treated as a single extra category for coloring.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub enum Section {
    Soprano,
    Alto,
    Tenor,
    Bass,
    Other(String),
}

impl Section {
    /// Parses a section label. Unknown labels never fail, they are wrapped
    /// in `Section::Other`.
    pub fn from_label(label: &str) -> Section {
        match label.trim() {
            "Soprano" => Section::Soprano,
            "Alto" => Section::Alto,
            "Tenor" => Section::Tenor,
            "Bass" => Section::Bass,
            s => Section::Other(s.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Section::Soprano => "Soprano",
            Section::Alto => "Alto",
            Section::Tenor => "Tenor",
            Section::Bass => "Bass",
            Section::Other(s) => s.as_str(),
        }
    }
}

/// A choir member as supplied by the caller, before any placement.
///
/// The height is optional at this level: the fixed-layout path does not
/// need it. Height-based assignment requires it for every member.
#[derive(PartialEq, Debug, Clone)]
pub struct Member {
    pub name: String,
    pub section: Section,
    pub height: Option<f64>,
}

// ******** Output data structures *********

/// A member with its assigned position on the stage.
///
/// Rows are numbered from the front starting at 1, columns left-to-right
/// starting at 1.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct PlacedMember {
    pub name: String,
    pub section: Section,
    pub row: u32,
    pub column: u32,
}

/// The outcome of one assignment run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LayoutOutcome {
    /// One placement per input member, in input order.
    pub placements: Vec<PlacedMember>,
    /// The number of members in each row, front row first.
    pub row_sizes: Vec<u32>,
}

/// Errors that prevent an assignment from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum LayoutErrors {
    EmptyRoster,
    /// A member has a blank name. The index refers to the input slice.
    MissingName { index: usize },
    /// Height-based assignment found a member without a height.
    MissingHeight { name: String },
    InvalidRowCount { num_rows: u32 },
    /// The remainder row would be empty or negative-sized under the
    /// requested row count (see `ShortRosterMode`).
    EmptyBackRow { num_rows: u32, num_members: usize },
}

impl Error for LayoutErrors {}

impl Display for LayoutErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayoutErrors::EmptyRoster => write!(f, "the roster is empty"),
            LayoutErrors::MissingName { index } => {
                write!(f, "member at position {} has a blank name", index)
            }
            LayoutErrors::MissingHeight { name } => {
                write!(f, "member {:?} has no height", name)
            }
            LayoutErrors::InvalidRowCount { num_rows } => {
                write!(f, "invalid number of rows: {}", num_rows)
            }
            LayoutErrors::EmptyBackRow {
                num_rows,
                num_members,
            } => {
                write!(
                    f,
                    "{} rows cannot be filled with {} members",
                    num_rows, num_members
                )
            }
        }
    }
}

// ********* Configuration **********

/// What to do when the requested row count cannot be honored because the
/// back row would end up with zero or fewer members.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ShortRosterMode {
    /// Fail with `LayoutErrors::EmptyBackRow`.
    Reject,
    /// Drop the rows that would be empty and produce a layout with fewer
    /// rows than requested.
    ShrinkRows,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LayoutConfig {
    pub num_rows: u32,
    pub short_roster_mode: ShortRosterMode,
}

impl LayoutConfig {
    pub const DEFAULT_CONFIG: LayoutConfig = LayoutConfig {
        num_rows: 3,
        short_roster_mode: ShortRosterMode::Reject,
    };
}

/// The mapping from sections to display colors.
///
/// This is an explicit value handed to the renderer so that several layouts
/// with different palettes can coexist in one process.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Palette {
    entries: Vec<(Section, String)>,
    fallback: String,
}

impl Palette {
    pub fn new(entries: Vec<(Section, String)>, fallback: String) -> Palette {
        Palette { entries, fallback }
    }

    pub fn color_for(&self, section: &Section) -> &str {
        self.entries
            .iter()
            .find(|(s, _)| s == section)
            .map(|(_, c)| c.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    pub fn fallback_color(&self) -> &str {
        self.fallback.as_str()
    }

    /// The declared section/color pairs, in declaration order.
    pub fn entries(&self) -> &[(Section, String)] {
        &self.entries
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette {
            entries: vec![
                (Section::Soprano, "red".to_string()),
                (Section::Alto, "blue".to_string()),
                (Section::Tenor, "green".to_string()),
                (Section::Bass, "purple".to_string()),
            ],
            fallback: "black".to_string(),
        }
    }
}
