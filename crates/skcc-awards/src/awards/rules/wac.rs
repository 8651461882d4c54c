use std::collections::{BTreeMap, BTreeSet};

use super::common::{cw_member, on_or_after, settle, Verdict};
use super::continents::{continent_for_callsign, Continent};
use crate::awards::domain::{ymd, AwardId, AwardRequirements, ContactRecord};
use crate::awards::ladder::{EndorsementTier, NOT_YET};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

/// Worked All Continents: members on each of the six IARU continents.
#[derive(Debug, Clone, Default)]
pub struct WacRule;

impl WacRule {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, record: &ContactRecord) -> Verdict<Continent> {
        cw_member(record)?;
        if record.key().recognized().is_none() {
            return Err("WAC requires a recorded mechanical key".into());
        }
        on_or_after(record, ymd(2011, 10, 9), "WAC effective date")?;
        continent_for_callsign(&record.callsign).ok_or_else(|| {
            format!("no continent known for callsign {}", record.callsign.trim()).into()
        })
    }
}

impl AwardRule for WacRule {
    fn id(&self) -> AwardId {
        AwardId::Wac
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let mut contacts_by_continent: BTreeMap<String, u64> = Continent::ordered()
            .iter()
            .map(|continent| (continent.code().to_string(), 0))
            .collect();
        let mut bands_by_continent: BTreeMap<String, BTreeMap<String, u64>> = BTreeMap::new();
        let mut worked = BTreeSet::new();

        for record in records {
            let Some(continent) = settle(self.id(), record, self.check(record)) else {
                continue;
            };
            let code = continent.code().to_string();
            worked.insert(code.clone());
            *contacts_by_continent.entry(code.clone()).or_insert(0) += 1;
            *bands_by_continent
                .entry(code)
                .or_default()
                .entry(record.band_or_unknown())
                .or_insert(0) += 1;
        }

        let missing = Continent::ordered()
            .iter()
            .filter(|continent| !worked.contains(continent.code()))
            .map(|continent| continent.code().to_string())
            .collect();
        let current = worked.len() as u64;
        let required = Continent::ordered().len() as u64;
        let achieved = current >= required;

        ProgressReport::new(
            self.id(),
            current,
            required,
            achieved,
            if achieved { "WAC" } else { NOT_YET },
            AwardDetails::Continents {
                worked,
                missing,
                contacts_by_continent,
                bands_by_continent,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact SKCC members in all six continental areas".to_string(),
            base_requirement: Continent::ordered().len() as u64,
            units: "continents".to_string(),
            effective_date: Some(ymd(2011, 10, 9)),
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Key type must be recorded as straight key, bug or sideswiper".to_string(),
                "Continent is derived from the worked station's callsign prefix".to_string(),
                "Boundaries follow IARU definitions".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        vec![EndorsementTier::new(Continent::ordered().len() as u64, "WAC")]
    }
}
