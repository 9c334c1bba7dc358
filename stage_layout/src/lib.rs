mod config;
use log::{debug, info};

pub mod builder;
pub mod quick_start;

pub use crate::config::*;

// **** Private structures ****

// A member index paired with its height, used while sorting. The index
// refers to the input slice and breaks ties to keep the sort stable.
#[derive(PartialEq, Debug, Clone, Copy)]
struct HeightKey {
    height: f64,
    index: usize,
}

/// Computes the stage position of every member with the given configuration.
///
/// Members are sorted by ascending height (ties keep input order) and dealt
/// into `config.num_rows` rows: the shortest members fill the front row
/// first, the tallest end up in the back. The first `num_rows - 1` rows each
/// take `ceil(N / num_rows)` members; the back row takes the remainder.
///
/// Arguments:
/// * `members` the roster to place. Every member must have a height.
/// * `config` the row count and the policy for rosters too small to fill
///   the requested rows.
pub fn assign_stage_positions(
    members: &[Member],
    config: &LayoutConfig,
) -> Result<LayoutOutcome, LayoutErrors> {
    info!(
        "assign_stage_positions: processing {} members over {} rows",
        members.len(),
        config.num_rows
    );

    if config.num_rows == 0 {
        return Err(LayoutErrors::InvalidRowCount {
            num_rows: config.num_rows,
        });
    }
    if members.is_empty() {
        return Err(LayoutErrors::EmptyRoster);
    }

    let mut keys: Vec<HeightKey> = Vec::with_capacity(members.len());
    for (index, m) in members.iter().enumerate() {
        if m.name.trim().is_empty() {
            return Err(LayoutErrors::MissingName { index });
        }
        match m.height {
            Some(height) => keys.push(HeightKey { height, index }),
            None => {
                return Err(LayoutErrors::MissingHeight {
                    name: m.name.clone(),
                });
            }
        }
    }

    // sort_by is stable, so equal heights keep their input order.
    keys.sort_by(|a, b| a.height.total_cmp(&b.height));

    let row_sizes = partition_rows(members.len(), config)?;
    debug!("assign_stage_positions: row sizes: {:?}", row_sizes);

    let mut placements: Vec<Option<PlacedMember>> = vec![None; members.len()];
    let mut sorted = keys.iter();
    for (row_idx, row_size) in row_sizes.iter().enumerate() {
        // Explicit per-row counter, reset at every row boundary.
        for column in 1..=*row_size {
            // partition_rows guarantees that the sizes sum to the number of
            // members, so the iterator cannot run dry here.
            let key = sorted.next().unwrap();
            let m = &members[key.index];
            placements[key.index] = Some(PlacedMember {
                name: m.name.clone(),
                section: m.section.clone(),
                row: (row_idx + 1) as u32,
                column,
            });
        }
    }

    let placements: Vec<PlacedMember> = placements.into_iter().flatten().collect();
    for p in placements.iter() {
        debug!(
            "assign_stage_positions: {} ({}) -> row {}, column {}",
            p.name,
            p.section.label(),
            p.row,
            p.column
        );
    }
    Ok(LayoutOutcome {
        placements,
        row_sizes,
    })
}

/// Splits `num_members` into row sizes, front row first.
fn partition_rows(num_members: usize, config: &LayoutConfig) -> Result<Vec<u32>, LayoutErrors> {
    let num_rows = config.num_rows as usize;
    let base = (num_members + num_rows - 1) / num_rows;
    let filled = base * (num_rows - 1);
    if filled >= num_members {
        // The remainder row would hold zero or fewer members.
        match config.short_roster_mode {
            ShortRosterMode::Reject => {
                return Err(LayoutErrors::EmptyBackRow {
                    num_rows: config.num_rows,
                    num_members,
                });
            }
            ShortRosterMode::ShrinkRows => {
                let mut sizes: Vec<u32> = Vec::new();
                let mut left = num_members;
                while left > 0 {
                    let take = left.min(base);
                    sizes.push(take as u32);
                    left -= take;
                }
                return Ok(sizes);
            }
        }
    }
    let mut sizes = vec![base as u32; num_rows - 1];
    sizes.push((num_members - filled) as u32);
    Ok(sizes)
}
