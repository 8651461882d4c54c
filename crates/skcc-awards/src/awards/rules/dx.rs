use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

use super::common::{cw_member, mechanical_or_absent_key, on_or_after, settle, Verdict};
use crate::awards::domain::{ymd, AwardId, AwardRequirements, ContactRecord};
use crate::awards::identity::MemberIdentity;
use crate::awards::ladder::{EndorsementLadder, EndorsementTier, ExtensionLabel, LadderError};
use crate::awards::report::{AwardDetails, ProgressReport};
use crate::awards::{AwardContext, AwardRule};

pub const DXCC_REQUIREMENT: u64 = 100;
pub const DX_BASE_REQUIREMENT: u64 = 10;
/// Maritime-mobile stations must be within this many nautical miles.
pub const MARITIME_MOBILE_LIMIT_NM: f64 = 12.0;

fn entity(record: &ContactRecord) -> Verdict<u32> {
    match record.dxcc {
        Some(entity) if entity > 0 => Ok(entity),
        _ => Err("no DXCC entity recorded".into()),
    }
}

/// Which DXCC listing a [`DxccRule`] tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxccMode {
    Mixed,
    Cw,
}

/// Confirmed DXCC entities, any mode or CW only.
#[derive(Debug, Clone)]
pub struct DxccRule {
    mode: DxccMode,
    ladder: EndorsementLadder,
}

impl DxccRule {
    pub fn new(mode: DxccMode) -> Result<Self, LadderError> {
        let mut tiers = vec![EndorsementTier::new(DXCC_REQUIREMENT, "DXCC")];
        tiers.extend((150..=300).step_by(50).map(|level| {
            EndorsementTier::new(level, format!("DXCC {level}"))
        }));
        let ladder = EndorsementLadder::new(tiers)?.with_extension(
            25,
            ExtensionLabel::Count {
                name: "DXCC".to_string(),
            },
        )?;
        Ok(Self { mode, ladder })
    }

    pub fn mixed() -> Result<Self, LadderError> {
        Self::new(DxccMode::Mixed)
    }

    pub fn cw() -> Result<Self, LadderError> {
        Self::new(DxccMode::Cw)
    }

    fn check(&self, record: &ContactRecord) -> Verdict<u32> {
        if self.mode == DxccMode::Cw && !record.is_cw() {
            return Err(format!("mode {} is not CW", record.mode.trim()).into());
        }
        let entity = entity(record)?;
        if !record.is_confirmed() {
            return Err("contact is not confirmed by QSL or LoTW".into());
        }
        Ok(entity)
    }
}

impl AwardRule for DxccRule {
    fn id(&self) -> AwardId {
        match self.mode {
            DxccMode::Mixed => AwardId::DxccMixed,
            DxccMode::Cw => AwardId::DxccCw,
        }
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let entities: BTreeSet<u32> = records
            .iter()
            .filter_map(|record| settle(self.id(), record, self.check(record)))
            .collect();
        let current = entities.len() as u64;

        ProgressReport::from_ladder(
            self.id(),
            current,
            &self.ladder,
            current >= DXCC_REQUIREMENT,
            AwardDetails::Dxcc { entities },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        let mut rules = vec!["QSL card or LoTW confirmation required".to_string()];
        let description = match self.mode {
            DxccMode::Mixed => {
                "Confirmed contacts with 100 or more DXCC entities in any mode".to_string()
            }
            DxccMode::Cw => {
                rules.insert(0, "CW only".to_string());
                "Confirmed CW contacts with 100 or more DXCC entities".to_string()
            }
        };
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description,
            base_requirement: DXCC_REQUIREMENT,
            units: "DXCC entities".to_string(),
            effective_date: None,
            prerequisite: None,
            rules,
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(4)
    }
}

/// Which SKCC DX tally a [`SkccDxRule`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DxTally {
    /// Every member worked in each entity counts.
    Qso,
    /// Each entity counts once.
    Country,
}

impl DxTally {
    fn effective_date(self) -> NaiveDate {
        match self {
            Self::Qso => ymd(2009, 6, 14),
            Self::Country => ymd(2009, 12, 19),
        }
    }

    fn prefix(self) -> &'static str {
        match self {
            Self::Qso => "DXQ",
            Self::Country => "DXC",
        }
    }
}

/// SKCC members worked outside the operator's home entity.
#[derive(Debug, Clone)]
pub struct SkccDxRule {
    tally: DxTally,
    ladder: EndorsementLadder,
}

impl SkccDxRule {
    pub fn new(tally: DxTally) -> Result<Self, LadderError> {
        let tiers = [10, 25, 50, 100]
            .into_iter()
            .map(|level| EndorsementTier::new(level, format!("{}-{level}", tally.prefix())))
            .collect();
        Ok(Self {
            tally,
            ladder: EndorsementLadder::new(tiers)?,
        })
    }

    pub fn qso() -> Result<Self, LadderError> {
        Self::new(DxTally::Qso)
    }

    pub fn country() -> Result<Self, LadderError> {
        Self::new(DxTally::Country)
    }

    fn check(&self, record: &ContactRecord, ctx: &AwardContext) -> Verdict<(u32, MemberIdentity)> {
        let identity = cw_member(record)?;
        mechanical_or_absent_key(record)?;
        on_or_after(record, self.tally.effective_date(), "DX effective date")?;

        let entity = entity(record)?;
        if entity == ctx.operator.home_dxcc {
            return Err(format!("entity {entity} is the operator's home entity").into());
        }

        if record.normalized_callsign().contains("/MM") {
            match record.distance {
                Some(distance) if distance <= MARITIME_MOBILE_LIMIT_NM => {}
                Some(distance) => {
                    return Err(format!(
                        "maritime-mobile contact {distance}nm away exceeds {MARITIME_MOBILE_LIMIT_NM}nm"
                    )
                    .into())
                }
                None => return Err("maritime-mobile contact has no distance".into()),
            }
        }

        Ok((entity, identity))
    }
}

impl AwardRule for SkccDxRule {
    fn id(&self) -> AwardId {
        match self.tally {
            DxTally::Qso => AwardId::Dxq,
            DxTally::Country => AwardId::Dxc,
        }
    }

    fn validate(&self, record: &ContactRecord, ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record, ctx)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], ctx: &AwardContext) -> ProgressReport {
        let mut pairs: BTreeSet<(u32, String)> = BTreeSet::new();
        for record in records {
            if let Some((entity, identity)) = settle(self.id(), record, self.check(record, ctx)) {
                pairs.insert((entity, identity.base));
            }
        }

        let mut contacts_by_entity: BTreeMap<u32, u64> = BTreeMap::new();
        for (entity, _) in &pairs {
            *contacts_by_entity.entry(*entity).or_insert(0) += 1;
        }
        let total_entities = contacts_by_entity.len() as u64;
        let current = match self.tally {
            DxTally::Qso => pairs.len() as u64,
            DxTally::Country => total_entities,
        };

        ProgressReport::from_ladder(
            self.id(),
            current,
            &self.ladder,
            current >= DX_BASE_REQUIREMENT,
            AwardDetails::DxMembers {
                contacts_by_entity,
                total_entities,
            },
        )
    }

    fn requirements(&self) -> AwardRequirements {
        let (description, units) = match self.tally {
            DxTally::Qso => (
                "Contact SKCC members outside your home DXCC entity; each member per entity counts",
                "member-entity contacts",
            ),
            DxTally::Country => (
                "Contact SKCC members in DXCC entities outside your home entity; each entity counts once",
                "DXCC entities",
            ),
        };
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: description.to_string(),
            base_requirement: DX_BASE_REQUIREMENT,
            units: units.to_string(),
            effective_date: Some(self.tally.effective_date()),
            prerequisite: None,
            rules: vec![
                "CW only".to_string(),
                "Straight key, bug or sideswiper".to_string(),
                "Contacts inside the operator's home entity do not count".to_string(),
                "Maritime-mobile stations must be within 12 nautical miles".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        self.ladder.listing(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dxcc_ladder_steps_by_25_past_300() {
        let rule = DxccRule::mixed().expect("valid ladder");
        let labels: Vec<String> = rule
            .endorsement_tiers()
            .into_iter()
            .map(|tier| tier.label)
            .collect();
        assert_eq!(
            labels,
            vec![
                "DXCC", "DXCC 150", "DXCC 200", "DXCC 250", "DXCC 300", "DXCC 325", "DXCC 350",
                "DXCC 375", "DXCC 400"
            ]
        );
    }

    #[test]
    fn dx_labels_carry_the_tally_prefix() {
        let rule = SkccDxRule::country().expect("valid ladder");
        let thresholds: Vec<(u64, String)> = rule
            .endorsement_tiers()
            .into_iter()
            .map(|tier| (tier.threshold, tier.label))
            .collect();
        assert_eq!(thresholds.first(), Some(&(10, "DXC-10".to_string())));
        assert_eq!(thresholds.last(), Some(&(100, "DXC-100".to_string())));
    }
}
