use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::domain::{AwardId, KeyType};
use super::ladder::EndorsementLadder;

/// Uniform progress shape returned by every award rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub award: AwardId,
    pub current: u64,
    /// Threshold of the next meaningful milestone.
    pub required: u64,
    pub achieved: bool,
    pub percentage: f64,
    pub endorsement: String,
    pub details: AwardDetails,
}

impl ProgressReport {
    pub fn new(
        award: AwardId,
        current: u64,
        required: u64,
        achieved: bool,
        endorsement: impl Into<String>,
        details: AwardDetails,
    ) -> Self {
        Self {
            award,
            current,
            required,
            achieved,
            percentage: percentage(current, required),
            endorsement: endorsement.into(),
            details,
        }
    }

    /// Report for ladder-based awards: the base tier until it is reached, then
    /// the next endorsement threshold.
    pub(crate) fn from_ladder(
        award: AwardId,
        current: u64,
        ladder: &EndorsementLadder,
        achieved: bool,
        details: AwardDetails,
    ) -> Self {
        let required = next_milestone(current, ladder);
        Self::new(
            award,
            current,
            required,
            achieved,
            ladder.level_for(current),
            details,
        )
    }
}

pub(crate) fn next_milestone(current: u64, ladder: &EndorsementLadder) -> u64 {
    let base = ladder.first_threshold();
    if current < base {
        return base;
    }
    ladder.next_threshold_for(current).unwrap_or(current.max(base))
}

pub(crate) fn percentage(current: u64, required: u64) -> f64 {
    if required == 0 {
        return 100.0;
    }
    (current as f64 / required as f64 * 100.0).min(100.0)
}

/// Award-specific extras carried alongside the uniform counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AwardDetails {
    Members {
        unique_members: BTreeSet<String>,
    },
    Tribune {
        unique_members: BTreeSet<String>,
        centurion_count: u64,
        is_centurion: bool,
    },
    Senator {
        unique_members: BTreeSet<String>,
        tribune_count: u64,
        is_tribune_x8: bool,
        tribune_x8_date: Option<NaiveDate>,
    },
    States {
        worked: BTreeSet<String>,
        missing: Vec<String>,
        contacts_by_state: BTreeMap<String, u64>,
        contacts_by_band: BTreeMap<String, u64>,
    },
    Continents {
        worked: BTreeSet<String>,
        missing: Vec<String>,
        contacts_by_continent: BTreeMap<String, u64>,
        bands_by_continent: BTreeMap<String, BTreeMap<String, u64>>,
    },
    Maple(MapleBreakdown),
    Prefixes {
        points_by_prefix: BTreeMap<String, u64>,
        contacts_by_prefix: BTreeMap<String, u64>,
    },
    RagChew {
        accepted_contacts: u64,
        back_to_back_rejected: u64,
        minutes_by_band: BTreeMap<String, u64>,
        level_by_band: BTreeMap<String, String>,
    },
    TripleKey {
        members_by_key: BTreeMap<KeyType, u64>,
        keys_complete: Vec<KeyType>,
    },
    Dxcc {
        entities: BTreeSet<u32>,
    },
    DxMembers {
        contacts_by_entity: BTreeMap<u32, u64>,
        total_entities: u64,
    },
}

/// Per-tier result of the Canadian Maple award.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapleBreakdown {
    pub current_level: String,
    pub regions_worked: BTreeSet<String>,
    pub yellow: bool,
    pub orange: bool,
    pub best_band: Option<String>,
    pub regions_by_band: BTreeMap<String, u64>,
    pub red: TierCheck,
    pub gold: TierCheck,
}

/// Diagnostics for the Red and Gold tiers, which share criteria.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierCheck {
    pub achieved: bool,
    pub total_contacts: u64,
    pub provinces_complete: u64,
    pub core_bands_complete: u64,
    pub contacts_by_province: BTreeMap<String, u64>,
    pub contacts_by_band: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awards::ladder::EndorsementLadder;

    #[test]
    fn percentage_is_capped_and_guarded() {
        assert_eq!(percentage(50, 100), 50.0);
        assert_eq!(percentage(250, 100), 100.0);
        assert_eq!(percentage(0, 0), 100.0);
    }

    #[test]
    fn milestone_moves_to_next_tier_once_base_is_met() {
        let ladder = EndorsementLadder::multiples("Tribune", 50, 10).expect("valid");
        assert_eq!(next_milestone(10, &ladder), 50);
        assert_eq!(next_milestone(50, &ladder), 100);
        assert_eq!(next_milestone(499, &ladder), 500);
        assert_eq!(next_milestone(620, &ladder), 620);
    }
}
