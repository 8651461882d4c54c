use std::collections::BTreeSet;

use super::common::{
    cw_member, distinct_members, is_special_event, mechanical_or_absent_key, on_or_after,
    senator_effective_date, settle, Verdict,
};
use super::tribune::TribuneRule;
use crate::awards::domain::{AwardId, AwardRequirements, ContactRecord};
use crate::awards::identity::MemberIdentity;
use crate::awards::ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const SENATOR_REQUIREMENT: u64 = 200;
/// Tribune x8: 400 distinct Tribune-eligible members.
pub const TRIBUNE_X8_REQUIREMENT: u64 = 400;

#[derive(Debug, Clone)]
pub struct SenatorRule {
    ladder: EndorsementLadder,
    tribune: TribuneRule,
}

impl SenatorRule {
    pub fn new() -> Result<Self, LadderError> {
        let ladder = EndorsementLadder::multiples("Senator", SENATOR_REQUIREMENT, 10)?
            .with_extension(
                SENATOR_REQUIREMENT,
                ExtensionLabel::Multiplier {
                    name: "Senator".to_string(),
                    unit: SENATOR_REQUIREMENT,
                },
            )?;
        Ok(Self {
            ladder,
            tribune: TribuneRule::new()?,
        })
    }

    pub(crate) fn check(
        &self,
        record: &ContactRecord,
        ctx: &AwardContext,
    ) -> Verdict<MemberIdentity> {
        let identity = cw_member(record)?;
        mechanical_or_absent_key(record)?;
        on_or_after(record, senator_effective_date(), "Senator effective date")?;
        if is_special_event(record) {
            return Err("special-event calls never count for Senator".into());
        }

        let own = ctx
            .operator
            .tribune_x8_date
            .ok_or("operator Tribune x8 date is not known")?;
        on_or_after(record, own, "operator Tribune x8 date")?;

        let roster = ctx
            .roster
            .as_ref()
            .ok_or("no membership roster to confirm Tribune standing")?;
        match roster.is_in_tribune_or_senator_roster(&identity.base) {
            Ok(true) => {}
            Ok(false) => {
                return Err(format!("member {} is not a Tribune or Senator", identity.base).into())
            }
            Err(err) => return Err(format!("roster lookup failed: {err}").into()),
        }
        match roster.tribune_date(&identity.base) {
            Ok(Some(theirs)) if record.qso_date().is_some_and(|date| date < theirs) => {
                return Err(format!("worked before member became Tribune on {theirs}").into())
            }
            Ok(_) => {}
            Err(err) => return Err(format!("roster lookup failed: {err}").into()),
        }

        Ok(identity)
    }

    pub fn unique_members(&self, records: &[ContactRecord], ctx: &AwardContext) -> BTreeSet<String> {
        distinct_members(records, ctx, |record, ctx| {
            settle(AwardId::Senator, record, self.check(record, ctx))
        })
    }
}

impl AwardRule for SenatorRule {
    fn id(&self) -> AwardId {
        AwardId::Senator
    }

    fn validate(&self, record: &ContactRecord, ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record, ctx)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], ctx: &AwardContext) -> ProgressReport {
        let unique_members = self.unique_members(records, ctx);
        let current = unique_members.len() as u64;
        let tribune_count = self.tribune.unique_members(records, ctx).len() as u64;
        let is_tribune_x8 = tribune_count >= TRIBUNE_X8_REQUIREMENT;

        ProgressReport::from_ladder(
            self.id(),
            current,
            &self.ladder,
            is_tribune_x8 && current >= SENATOR_REQUIREMENT,
            AwardDetails::Senator {
                unique_members,
                tribune_count,
                is_tribune_x8,
                tribune_x8_date: ctx.operator.tribune_x8_date,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact 200 different Tribunes or Senators after reaching Tribune x8"
                .to_string(),
            base_requirement: SENATOR_REQUIREMENT,
            units: "unique T/S members".to_string(),
            effective_date: Some(senator_effective_date()),
            prerequisite: Some("Tribune x8 (400 unique C/T/S members)".to_string()),
            rules: vec![
                "CW only".to_string(),
                "Straight key, bug or sideswiper".to_string(),
                "Contacts count only after the operator's Tribune x8 date".to_string(),
                "Remote station must be a Tribune or Senator at time of contact".to_string(),
                "K9SKC and K3Y never count".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(5)
    }
}
