use std::collections::{BTreeMap, BTreeSet};

use super::common::{cw_member, settle, Verdict};
use crate::awards::domain::{AwardId, AwardRequirements, ContactRecord};
use crate::awards::ladder::{EndorsementTier, NOT_YET};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Worked All States: members in each of the 50 states.
#[derive(Debug, Clone, Default)]
pub struct WasRule;

impl WasRule {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, record: &ContactRecord) -> Verdict<String> {
        cw_member(record)?;
        if record.key().recognized().is_none() {
            return Err("WAS requires a recorded mechanical key".into());
        }
        match record.state() {
            Some(state) if US_STATES.contains(&state.as_str()) => Ok(state),
            Some(state) => Err(format!("{state} is not one of the 50 US states").into()),
            None => Err("no state recorded".into()),
        }
    }
}

impl AwardRule for WasRule {
    fn id(&self) -> AwardId {
        AwardId::Was
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let mut contacts_by_state = BTreeMap::new();
        let mut contacts_by_band = BTreeMap::new();

        for record in records {
            let Some(state) = settle(self.id(), record, self.check(record)) else {
                continue;
            };
            *contacts_by_state.entry(state).or_insert(0) += 1;
            *contacts_by_band.entry(record.band_or_unknown()).or_insert(0) += 1;
        }

        let worked: BTreeSet<String> = contacts_by_state.keys().cloned().collect();
        let missing: Vec<String> = US_STATES
            .iter()
            .filter(|state| !worked.contains(**state))
            .map(|state| state.to_string())
            .collect();
        let current = worked.len() as u64;
        let required = US_STATES.len() as u64;
        let achieved = current >= required;

        ProgressReport::new(
            self.id(),
            current,
            required,
            achieved,
            if achieved { "WAS" } else { NOT_YET },
            AwardDetails::States {
                worked,
                missing,
                contacts_by_state,
                contacts_by_band,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact SKCC members in all 50 US states".to_string(),
            base_requirement: US_STATES.len() as u64,
            units: "US states".to_string(),
            effective_date: None,
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Key type must be recorded as straight key, bug or sideswiper".to_string(),
                "State is taken from the contact's state field".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        vec![EndorsementTier::new(US_STATES.len() as u64, "WAS")]
    }
}
