use std::collections::BTreeMap;

use super::common::{
    cw_member, is_special_event, mechanical_or_absent_key, on_or_after, settle, Verdict,
};
use crate::awards::domain::{ymd, AwardId, AwardRequirements, ContactRecord};
use crate::awards::ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const PFX_STEP: u64 = 500_000;

/// Prefix of the home callsign, ignoring portable designators.
///
/// Among the `/` segments, the one that looks like a full callsign (a digit
/// followed by a letter) wins, longest first; otherwise the first segment with
/// any digit. The prefix is its leading alphanumeric run cut after the last
/// digit: `W5LFA` gives `W5`, `2D0YLX` gives `2D0`.
pub fn extract_prefix(callsign: &str) -> Option<String> {
    let callsign = callsign.trim().to_ascii_uppercase();
    let segments: Vec<&str> = callsign.split('/').filter(|part| !part.is_empty()).collect();

    let home = segments
        .iter()
        .rev()
        .filter(|segment| looks_like_call(segment))
        .max_by_key(|segment| segment.len())
        .or_else(|| {
            segments
                .iter()
                .find(|segment| segment.bytes().any(|byte| byte.is_ascii_digit()))
        })?;

    let run: &str = home
        .split(|c: char| !c.is_ascii_alphanumeric())
        .next()
        .unwrap_or_default();
    let end = run.rfind(|c: char| c.is_ascii_digit())?;
    Some(run[..=end].to_string())
}

fn looks_like_call(segment: &str) -> bool {
    segment
        .as_bytes()
        .windows(2)
        .any(|pair| pair[0].is_ascii_digit() && pair[1].is_ascii_alphabetic())
}

/// Prefix points: the sum over prefixes of the highest member number worked.
#[derive(Debug, Clone)]
pub struct PrefixRule {
    ladder: EndorsementLadder,
}

struct PrefixContact {
    prefix: String,
    number: u64,
}

impl PrefixRule {
    pub fn new() -> Result<Self, LadderError> {
        let tiers = (1..=10)
            .map(|level| EndorsementTier::new(level * PFX_STEP, format!("Px{level}")))
            .collect();
        let ladder = EndorsementLadder::new(tiers)?.with_extension(
            PFX_STEP,
            ExtensionLabel::Stride {
                prefix: "Px".to_string(),
                start: 10,
                increment: 5,
            },
        )?;
        Ok(Self { ladder })
    }

    fn check(&self, record: &ContactRecord) -> Verdict<PrefixContact> {
        let identity = cw_member(record)?;
        mechanical_or_absent_key(record)?;
        on_or_after(record, ymd(2013, 1, 1), "PFX effective date")?;
        if is_special_event(record) {
            return Err("special-event calls never count for PFX".into());
        }
        let prefix = extract_prefix(&record.callsign)
            .ok_or_else(|| format!("no prefix in callsign {}", record.callsign.trim()))?;
        let number = identity
            .number()
            .ok_or("member number out of range")?;
        Ok(PrefixContact { prefix, number })
    }
}

impl AwardRule for PrefixRule {
    fn id(&self) -> AwardId {
        AwardId::Pfx
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let mut points_by_prefix: BTreeMap<String, u64> = BTreeMap::new();
        let mut contacts_by_prefix: BTreeMap<String, u64> = BTreeMap::new();

        for record in records {
            let Some(contact) = settle(self.id(), record, self.check(record)) else {
                continue;
            };
            *contacts_by_prefix.entry(contact.prefix.clone()).or_insert(0) += 1;
            let best = points_by_prefix.entry(contact.prefix).or_insert(0);
            *best = (*best).max(contact.number);
        }

        let points = points_by_prefix
            .values()
            .fold(0u64, |total, best| total.saturating_add(*best));

        ProgressReport::from_ladder(
            self.id(),
            points,
            &self.ladder,
            points >= PFX_STEP,
            AwardDetails::Prefixes {
                points_by_prefix,
                contacts_by_prefix,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Accumulate 500,000 prefix points".to_string(),
            base_requirement: PFX_STEP,
            units: "points".to_string(),
            effective_date: Some(ymd(2013, 1, 1)),
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Straight key, bug or sideswiper".to_string(),
                "Each prefix scores the highest SKCC number worked with it".to_string(),
                "Portable designators separated by / are ignored".to_string(),
                "K9SKC and K3Y never count".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(4)
    }
}
