use std::collections::{BTreeMap, BTreeSet};

use super::common::{cw_member, on_or_after, settle, Verdict};
use crate::awards::domain::{ymd, AwardId, AwardRequirements, ContactRecord, KeyType};
use crate::awards::identity::MemberIdentity;
use crate::awards::ladder::{EndorsementTier, NOT_YET};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const MEMBERS_PER_KEY: u64 = 100;

/// 100 distinct members on each of straight key, bug and sideswiper.
#[derive(Debug, Clone, Default)]
pub struct TripleKeyRule;

impl TripleKeyRule {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, record: &ContactRecord) -> Verdict<(MemberIdentity, KeyType)> {
        let identity = cw_member(record)?;
        let key = record
            .key()
            .recognized()
            .ok_or("Triple Key requires a recorded mechanical key")?;
        on_or_after(record, ymd(2018, 11, 10), "Triple Key effective date")?;
        Ok((identity, key))
    }
}

impl AwardRule for TripleKeyRule {
    fn id(&self) -> AwardId {
        AwardId::TripleKey
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let mut by_key: BTreeMap<KeyType, BTreeSet<String>> = KeyType::ordered()
            .into_iter()
            .map(|key| (key, BTreeSet::new()))
            .collect();

        for record in records {
            if let Some((identity, key)) = settle(self.id(), record, self.check(record)) {
                by_key.entry(key).or_default().insert(identity.base);
            }
        }

        let union: BTreeSet<&String> = by_key.values().flatten().collect();
        let members_by_key: BTreeMap<KeyType, u64> = by_key
            .iter()
            .map(|(key, members)| (*key, members.len() as u64))
            .collect();
        let keys_complete: Vec<KeyType> = members_by_key
            .iter()
            .filter(|(_, count)| **count >= MEMBERS_PER_KEY)
            .map(|(key, _)| *key)
            .collect();
        let achieved = keys_complete.len() == KeyType::ordered().len();
        let required = MEMBERS_PER_KEY * KeyType::ordered().len() as u64;

        ProgressReport::new(
            self.id(),
            union.len() as u64,
            required,
            achieved,
            if achieved { "Triple Key" } else { NOT_YET },
            AwardDetails::TripleKey {
                members_by_key,
                keys_complete,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact 100 different members with each of straight key, bug and sideswiper"
                .to_string(),
            base_requirement: MEMBERS_PER_KEY * KeyType::ordered().len() as u64,
            units: "unique members per key type".to_string(),
            effective_date: Some(ymd(2018, 11, 10)),
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Key type must be recorded for every contact".to_string(),
                "A member may count once per key type".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        vec![EndorsementTier::new(
            MEMBERS_PER_KEY * KeyType::ordered().len() as u64,
            "Triple Key",
        )]
    }
}
