use chrono::NaiveDate;
use std::collections::{BTreeSet, HashSet};

use super::centurion::{CenturionRule, CENTURION_REQUIREMENT};
use super::common::{
    cw_member, distinct_members, mechanical_or_absent_key, on_or_after, settle,
    special_event_after, tribune_effective_date, tribune_special_event_cutoff, Verdict,
};
use super::senator::TRIBUNE_X8_REQUIREMENT;
use crate::awards::domain::{AwardId, AwardRequirements, ContactRecord};
use crate::awards::identity::MemberIdentity;
use crate::awards::ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const TRIBUNE_REQUIREMENT: u64 = 50;

/// 50 distinct Centurions, Tribunes or Senators, worked after becoming a Centurion.
#[derive(Debug, Clone)]
pub struct TribuneRule {
    ladder: EndorsementLadder,
    centurion: CenturionRule,
}

impl TribuneRule {
    pub fn new() -> Result<Self, LadderError> {
        let ladder = EndorsementLadder::multiples("Tribune", TRIBUNE_REQUIREMENT, 10)?
            .with_extension(
                250,
                ExtensionLabel::Multiplier {
                    name: "Tribune".to_string(),
                    unit: TRIBUNE_REQUIREMENT,
                },
            )?;
        Ok(Self {
            ladder,
            centurion: CenturionRule::new()?,
        })
    }

    pub(crate) fn check(
        &self,
        record: &ContactRecord,
        ctx: &AwardContext,
    ) -> Verdict<MemberIdentity> {
        let identity = cw_member(record)?;
        mechanical_or_absent_key(record)?;
        on_or_after(record, tribune_effective_date(), "Tribune effective date")?;
        if special_event_after(record, tribune_special_event_cutoff()) {
            return Err("special-event call after the October 2008 cutoff".into());
        }

        let date = record.qso_date();
        if let (Some(date), Some(own)) = (date, ctx.operator.centurion_date) {
            if date < own {
                return Err(format!("worked before operator became Centurion on {own}").into());
            }
        }

        let roster = ctx
            .roster
            .as_ref()
            .ok_or("no membership roster to confirm Centurion standing")?;
        match roster.is_centurion_or_higher(&identity.base) {
            Ok(true) => {}
            Ok(false) => {
                return Err(format!("member {} is not a Centurion or higher", identity.base).into())
            }
            Err(err) => return Err(format!("roster lookup failed: {err}").into()),
        }
        match roster.centurion_date(&identity.base) {
            Ok(Some(theirs)) if date.is_some_and(|date| date < theirs) => {
                return Err(format!("worked before member became Centurion on {theirs}").into())
            }
            Ok(_) => {}
            Err(err) => return Err(format!("roster lookup failed: {err}").into()),
        }

        Ok(identity)
    }

    pub fn unique_members(&self, records: &[ContactRecord], ctx: &AwardContext) -> BTreeSet<String> {
        distinct_members(records, ctx, |record, ctx| {
            settle(AwardId::Tribune, record, self.check(record, ctx))
        })
    }

    /// Date of the contact that brought in the 400th distinct Tribune-eligible
    /// member, i.e. when the operator reached Tribune x8.
    pub fn x8_achievement_date(
        &self,
        records: &[ContactRecord],
        ctx: &AwardContext,
    ) -> Option<NaiveDate> {
        let mut ordered: Vec<&ContactRecord> = records.iter().collect();
        ordered.sort_by_key(|record| record.chronological_key());

        let mut seen = HashSet::new();
        for record in ordered {
            let Ok(identity) = self.check(record, ctx) else {
                continue;
            };
            if seen.insert(identity.base) && seen.len() as u64 == TRIBUNE_X8_REQUIREMENT {
                return record.qso_date();
            }
        }
        None
    }
}

impl AwardRule for TribuneRule {
    fn id(&self) -> AwardId {
        AwardId::Tribune
    }

    fn validate(&self, record: &ContactRecord, ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record, ctx)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], ctx: &AwardContext) -> ProgressReport {
        let unique_members = self.unique_members(records, ctx);
        let current = unique_members.len() as u64;
        let centurion_count = self.centurion.unique_members(records, ctx).len() as u64;
        let is_centurion = centurion_count >= CENTURION_REQUIREMENT;

        ProgressReport::from_ladder(
            self.id(),
            current,
            &self.ladder,
            is_centurion && current >= TRIBUNE_REQUIREMENT,
            AwardDetails::Tribune {
                unique_members,
                centurion_count,
                is_centurion,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact 50 different Centurions, Tribunes or Senators".to_string(),
            base_requirement: TRIBUNE_REQUIREMENT,
            units: "unique C/T/S members".to_string(),
            effective_date: Some(tribune_effective_date()),
            prerequisite: Some("Centurion (100 unique members)".to_string()),
            rules: vec![
                "CW only".to_string(),
                "Straight key, bug or sideswiper".to_string(),
                "Both operators must be Centurions at time of contact".to_string(),
                "K9SKC and K3Y do not count from 1 October 2008".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(4)
    }
}
