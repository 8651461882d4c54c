//! Award eligibility and progress engine.
//!
//! Each award is an [`AwardRule`] strategy: a per-record `validate` predicate
//! plus a batch `calculate_progress` over the whole log. Rules are stateless;
//! external collaborators (the roster snapshot, the operator's own
//! achievement dates) arrive through [`AwardContext`].

pub mod domain;
pub mod identity;
pub mod ladder;
pub mod registry;
pub mod report;
pub mod rules;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use domain::{
    AwardId, AwardRequirements, ContactRecord, KeyAssessment, KeyType, OperatorProfile,
    DEFAULT_HOME_DXCC,
};
pub use identity::{extract_base_identity, get_designation, Designation, MemberIdentity};
pub use ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError, NOT_YET};
pub use registry::{AwardError, AwardRegistry, BoundAward};
pub use report::{AwardDetails, MapleBreakdown, ProgressReport, TierCheck};

use crate::roster::RosterLookup;

/// Shared handle to a read-only roster snapshot.
pub type SharedRoster = Arc<dyn RosterLookup + Send + Sync>;

/// Collaborators a rule may consult while validating.
#[derive(Clone, Default)]
pub struct AwardContext {
    pub roster: Option<SharedRoster>,
    pub operator: OperatorProfile,
}

impl AwardContext {
    pub fn new(operator: OperatorProfile) -> Self {
        Self {
            roster: None,
            operator,
        }
    }

    pub fn with_roster(mut self, roster: SharedRoster) -> Self {
        self.roster = Some(roster);
        self
    }
}

impl std::fmt::Debug for AwardContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwardContext")
            .field("roster", &self.roster.as_ref().map(|_| "<roster>"))
            .field("operator", &self.operator)
            .finish()
    }
}

/// Capability every award strategy provides.
pub trait AwardRule: Send + Sync {
    fn id(&self) -> AwardId;

    /// Whether a single contact counts toward this award.
    fn validate(&self, record: &ContactRecord, ctx: &AwardContext) -> bool;

    /// Progress over `records`; every record is re-validated.
    fn calculate_progress(&self, records: &[ContactRecord], ctx: &AwardContext) -> ProgressReport;

    fn requirements(&self) -> AwardRequirements;

    fn endorsement_tiers(&self) -> Vec<EndorsementTier>;
}
