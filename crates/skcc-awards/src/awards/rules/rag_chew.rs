use std::collections::BTreeMap;
use tracing::debug;

use super::common::{cw_member, mechanical_or_absent_key, on_or_after, settle, Verdict};
use crate::awards::domain::{ymd, AwardId, AwardRequirements, ContactRecord};
use crate::awards::identity::MemberIdentity;
use crate::awards::ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const RAG_CHEW_BASE_MINUTES: u64 = 300;
pub const MIN_CONTACT_MINUTES: f64 = 30.0;

/// Accumulated minutes of 30-minute-plus conversations.
#[derive(Debug, Clone)]
pub struct RagChewRule {
    ladder: EndorsementLadder,
}

impl RagChewRule {
    pub fn new() -> Result<Self, LadderError> {
        let ladder = EndorsementLadder::multiples("Rag Chew", RAG_CHEW_BASE_MINUTES, 10)?
            .with_extension(
                5 * RAG_CHEW_BASE_MINUTES,
                ExtensionLabel::Multiplier {
                    name: "Rag Chew".to_string(),
                    unit: RAG_CHEW_BASE_MINUTES,
                },
            )?;
        Ok(Self { ladder })
    }

    fn check(&self, record: &ContactRecord) -> Verdict<(MemberIdentity, f64)> {
        let identity = cw_member(record)?;
        mechanical_or_absent_key(record)?;
        on_or_after(record, ymd(2013, 7, 1), "Rag Chew effective date")?;
        match record.duration_minutes {
            Some(minutes) if minutes.is_finite() && minutes >= MIN_CONTACT_MINUTES => {
                Ok((identity, minutes))
            }
            Some(minutes) => Err(format!(
                "{minutes} minute contact is shorter than {MIN_CONTACT_MINUTES}"
            )
            .into()),
            None => Err("no duration recorded".into()),
        }
    }

    /// Single-band level: minutes below the base, then `Base`, `x2`, ...
    pub fn band_level(minutes: u64) -> String {
        match minutes / RAG_CHEW_BASE_MINUTES {
            0 => format!("{minutes}m"),
            1 => "Base".to_string(),
            multiple => format!("x{multiple}"),
        }
    }
}

impl AwardRule for RagChewRule {
    fn id(&self) -> AwardId {
        AwardId::RagChew
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let mut ordered: Vec<&ContactRecord> = records.iter().collect();
        ordered.sort_by_key(|record| record.chronological_key());

        let mut total_minutes = 0.0_f64;
        let mut accepted_contacts = 0u64;
        let mut back_to_back_rejected = 0u64;
        let mut band_totals: BTreeMap<String, f64> = BTreeMap::new();
        let mut last_accepted: Option<String> = None;

        for record in ordered {
            let Some((identity, minutes)) = settle(self.id(), record, self.check(record)) else {
                continue;
            };
            if last_accepted.as_deref() == Some(identity.base.as_str()) {
                debug!(
                    award = self.id().slug(),
                    member = %identity.base,
                    qso_date = %record.qso_date,
                    "back-to-back contact rejected"
                );
                back_to_back_rejected += 1;
                continue;
            }

            total_minutes += minutes;
            accepted_contacts += 1;
            *band_totals.entry(record.band_or_unknown()).or_insert(0.0) += minutes;
            last_accepted = Some(identity.base);
        }

        // Fractional minutes accumulate; reports show whole minutes.
        let total_minutes = whole_minutes(total_minutes);
        let minutes_by_band: BTreeMap<String, u64> = band_totals
            .into_iter()
            .map(|(band, minutes)| (band, whole_minutes(minutes)))
            .collect();
        let level_by_band = minutes_by_band
            .iter()
            .map(|(band, minutes)| (band.clone(), Self::band_level(*minutes)))
            .collect();

        ProgressReport::from_ladder(
            self.id(),
            total_minutes,
            &self.ladder,
            total_minutes >= RAG_CHEW_BASE_MINUTES,
            AwardDetails::RagChew {
                accepted_contacts,
                back_to_back_rejected,
                minutes_by_band,
                level_by_band,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Accumulate 300 minutes of CW conversations lasting 30 minutes or more"
                .to_string(),
            base_requirement: RAG_CHEW_BASE_MINUTES,
            units: "minutes".to_string(),
            effective_date: Some(ymd(2013, 7, 1)),
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Straight key, bug or sideswiper".to_string(),
                "Each contact must last at least 30 minutes".to_string(),
                "A different member must be worked between two contacts with the same member"
                    .to_string(),
                "Single-band endorsements track minutes per band".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(4)
    }
}

fn whole_minutes(minutes: f64) -> u64 {
    minutes.floor() as u64
}
