use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};

use super::common::{
    centurion_special_event_cutoff, cw_member, distinct_members, mechanical_or_absent_key,
    settle, special_event_after, Verdict,
};
use crate::awards::domain::{AwardId, AwardRequirements, ContactRecord};
use crate::awards::identity::MemberIdentity;
use crate::awards::ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const CENTURION_REQUIREMENT: u64 = 100;

/// 100 distinct members worked with a mechanical key.
#[derive(Debug, Clone)]
pub struct CenturionRule {
    ladder: EndorsementLadder,
}

impl CenturionRule {
    pub fn new() -> Result<Self, LadderError> {
        let ladder = EndorsementLadder::multiples("Centurion", CENTURION_REQUIREMENT, 10)?
            .with_extension(
                500,
                ExtensionLabel::Multiplier {
                    name: "Centurion".to_string(),
                    unit: CENTURION_REQUIREMENT,
                },
            )?;
        Ok(Self { ladder })
    }

    pub(crate) fn check(&self, record: &ContactRecord) -> Verdict<MemberIdentity> {
        let identity = cw_member(record)?;
        mechanical_or_absent_key(record)?;
        if special_event_after(record, centurion_special_event_cutoff()) {
            return Err("special-event call after the December 2009 cutoff".into());
        }
        Ok(identity)
    }

    /// Distinct base identities among qualifying contacts.
    pub fn unique_members(
        &self,
        records: &[ContactRecord],
        ctx: &AwardContext,
    ) -> BTreeSet<String> {
        distinct_members(records, ctx, |record, _| {
            settle(AwardId::Centurion, record, self.check(record))
        })
    }

    /// Date of the contact that brought in the 100th distinct member.
    pub fn achievement_date(&self, records: &[ContactRecord]) -> Option<NaiveDate> {
        let mut ordered: Vec<&ContactRecord> = records.iter().collect();
        ordered.sort_by_key(|record| record.chronological_key());

        let mut seen = HashSet::new();
        for record in ordered {
            let Ok(identity) = self.check(record) else {
                continue;
            };
            if seen.insert(identity.base) && seen.len() as u64 == CENTURION_REQUIREMENT {
                return record.qso_date();
            }
        }
        None
    }
}

impl AwardRule for CenturionRule {
    fn id(&self) -> AwardId {
        AwardId::Centurion
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], ctx: &AwardContext) -> ProgressReport {
        let unique_members = self.unique_members(records, ctx);
        let current = unique_members.len() as u64;

        ProgressReport::from_ladder(
            self.id(),
            current,
            &self.ladder,
            current >= CENTURION_REQUIREMENT,
            AwardDetails::Members { unique_members },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact 100 different SKCC members".to_string(),
            base_requirement: CENTURION_REQUIREMENT,
            units: "unique SKCC members".to_string(),
            effective_date: None,
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Straight key, bug or sideswiper".to_string(),
                "Both operators must hold SKCC membership at time of contact".to_string(),
                "K9SKC and K3Y do not count from 1 December 2009".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(6)
    }
}
