pub use crate::config::*;
use crate::assign_stage_positions;

/// A builder for assembling a roster member by member.
///
/// This is the convenient entry point when the members do not come from a
/// spreadsheet.
///
/// ```
/// pub use stage_layout::builder::RosterBuilder;
/// pub use stage_layout::LayoutConfig;
/// # use stage_layout::LayoutErrors;
///
/// let mut builder = RosterBuilder::new(&LayoutConfig::DEFAULT_CONFIG);
/// builder.add_member_simple("Ann Smith", "Soprano", 150.0)?;
/// builder.add_member_simple("Ben Ode", "Alto", 172.0)?;
/// builder.add_member_simple("Cam Fox", "Tenor", 181.0)?;
///
/// let outcome = builder.assign()?;
/// assert_eq!(outcome.placements.len(), 3);
///
/// # Ok::<(), LayoutErrors>(())
/// ```
pub struct RosterBuilder {
    pub(crate) _config: LayoutConfig,
    pub(crate) _members: Vec<Member>,
}

impl RosterBuilder {
    pub fn new(config: &LayoutConfig) -> RosterBuilder {
        RosterBuilder {
            _config: config.clone(),
            _members: Vec::new(),
        }
    }

    /// Adds a member from plain values.
    ///
    /// The section label is parsed leniently: unrecognized labels become an
    /// extra category instead of failing.
    pub fn add_member_simple(
        &mut self,
        name: &str,
        section: &str,
        height: f64,
    ) -> Result<(), LayoutErrors> {
        self.add_member(&Member {
            name: name.to_string(),
            section: Section::from_label(section),
            height: Some(height),
        })
    }

    pub fn add_member(&mut self, member: &Member) -> Result<(), LayoutErrors> {
        if member.name.trim().is_empty() {
            return Err(LayoutErrors::MissingName {
                index: self._members.len(),
            });
        }
        self._members.push(member.clone());
        Ok(())
    }

    /// Runs the assignment over the members added so far.
    pub fn assign(&self) -> Result<LayoutOutcome, LayoutErrors> {
        assign_stage_positions(&self._members, &self._config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_blank_names_early() {
        let mut builder = RosterBuilder::new(&LayoutConfig::DEFAULT_CONFIG);
        let res = builder.add_member_simple("", "Soprano", 150.0);
        assert_eq!(res, Err(LayoutErrors::MissingName { index: 0 }));
    }

    #[test]
    fn builder_runs_the_assignment() {
        let config = LayoutConfig {
            num_rows: 2,
            short_roster_mode: ShortRosterMode::Reject,
        };
        let mut builder = RosterBuilder::new(&config);
        builder.add_member_simple("Ann Smith", "Soprano", 150.0).unwrap();
        builder.add_member_simple("Ben Ode", "Alto", 172.0).unwrap();
        builder.add_member_simple("Cam Fox", "Tenor", 181.0).unwrap();
        let outcome = builder.assign().unwrap();
        assert_eq!(outcome.row_sizes, vec![2, 1]);
    }
}
