use std::collections::{BTreeMap, BTreeSet};

use super::common::{cw_member, mechanical_or_absent_key, on_or_after, settle, Verdict};
use crate::awards::domain::{ymd, AwardId, AwardRequirements, ContactRecord};
use crate::awards::ladder::{EndorsementTier, NOT_YET};
use crate::awards::report::{AwardDetails, MapleBreakdown, ProgressReport, TierCheck};
use crate::awards::{AwardContext, AwardRule};

pub const PROVINCES: [&str; 10] = ["BC", "AB", "SK", "MB", "ON", "QC", "NB", "NS", "PE", "NL"];
pub const TERRITORIES: [&str; 3] = ["YT", "NT", "NU"];
pub const HF_BANDS: [&str; 10] = [
    "160M", "80M", "60M", "40M", "30M", "20M", "17M", "15M", "12M", "10M",
];
/// Red and Gold count these; 60 m is excluded.
pub const CORE_BANDS: [&str; 9] = ["160M", "80M", "40M", "30M", "20M", "17M", "15M", "12M", "10M"];

const REGIONS_REQUIRED: u64 = 10;
const CONTACTS_PER_BUCKET: u64 = 10;
const RED_TOTAL: u64 = 90;
const QRP_WATTS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapleTier {
    Yellow,
    Orange,
    Red,
    Gold,
}

impl MapleTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Yellow, Self::Orange, Self::Red, Self::Gold]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow Maple",
            Self::Orange => "Orange Maple",
            Self::Red => "Red Maple",
            Self::Gold => "Gold Maple",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CanadianMapleRule;

/// A validated Maple contact reduced to what the tiers look at.
struct MapleContact {
    region: String,
    band: String,
    qrp: bool,
}

impl CanadianMapleRule {
    pub fn new() -> Self {
        Self
    }

    fn check(&self, record: &ContactRecord) -> Verdict<MapleContact> {
        cw_member(record)?;

        let country = record.country.as_deref().map(str::trim).unwrap_or_default();
        if !country.eq_ignore_ascii_case("CANADA") {
            return Err(format!("country {country:?} is not Canada").into());
        }

        let region = record.state().ok_or("no province or territory recorded")?;
        let is_province = PROVINCES.contains(&region.as_str());
        if !is_province && !TERRITORIES.contains(&region.as_str()) {
            return Err(format!("{region} is not a Canadian province or territory").into());
        }

        let band = record.band().ok_or("no band recorded")?;
        if !HF_BANDS.contains(&band.as_str()) {
            return Err(format!("{band} is not an eligible HF band").into());
        }

        mechanical_or_absent_key(record)?;

        if is_province {
            on_or_after(record, ymd(2009, 9, 1), "province effective date")?;
        } else {
            on_or_after(record, ymd(2014, 1, 1), "territory effective date")?;
        }

        Ok(MapleContact {
            region,
            band,
            qrp: record.tx_power.is_some_and(|watts| watts <= QRP_WATTS),
        })
    }

    fn red_criteria<'a>(contacts: impl Iterator<Item = &'a MapleContact>) -> TierCheck {
        let mut contacts_by_province: BTreeMap<String, u64> =
            PROVINCES.iter().map(|p| (p.to_string(), 0)).collect();
        let mut contacts_by_band: BTreeMap<String, u64> =
            CORE_BANDS.iter().map(|b| (b.to_string(), 0)).collect();
        let mut total_contacts = 0;

        for contact in contacts {
            total_contacts += 1;
            if let Some(count) = contacts_by_province.get_mut(&contact.region) {
                *count += 1;
            }
            if let Some(count) = contacts_by_band.get_mut(&contact.band) {
                *count += 1;
            }
        }

        let provinces_complete = contacts_by_province
            .values()
            .filter(|count| **count >= CONTACTS_PER_BUCKET)
            .count() as u64;
        let core_bands_complete = contacts_by_band
            .values()
            .filter(|count| **count >= CONTACTS_PER_BUCKET)
            .count() as u64;

        TierCheck {
            achieved: total_contacts >= RED_TOTAL
                && provinces_complete == PROVINCES.len() as u64
                && core_bands_complete >= CORE_BANDS.len() as u64,
            total_contacts,
            provinces_complete,
            core_bands_complete,
            contacts_by_province,
            contacts_by_band,
        }
    }
}

impl AwardRule for CanadianMapleRule {
    fn id(&self) -> AwardId {
        AwardId::CanadianMaple
    }

    fn validate(&self, record: &ContactRecord, _ctx: &AwardContext) -> bool {
        settle(self.id(), record, self.check(record)).is_some()
    }

    fn calculate_progress(&self, records: &[ContactRecord], _ctx: &AwardContext) -> ProgressReport {
        let contacts: Vec<MapleContact> = records
            .iter()
            .filter_map(|record| settle(self.id(), record, self.check(record)))
            .collect();

        let regions_worked: BTreeSet<String> =
            contacts.iter().map(|contact| contact.region.clone()).collect();
        let yellow = regions_worked.len() as u64 >= REGIONS_REQUIRED;

        let mut band_regions: BTreeMap<String, BTreeSet<&str>> = BTreeMap::new();
        for contact in &contacts {
            band_regions
                .entry(contact.band.clone())
                .or_default()
                .insert(contact.region.as_str());
        }
        let regions_by_band: BTreeMap<String, u64> = band_regions
            .iter()
            .map(|(band, regions)| (band.clone(), regions.len() as u64))
            .collect();
        let mut best_band: Option<(&str, u64)> = None;
        for band in HF_BANDS {
            let count = regions_by_band.get(band).copied().unwrap_or_default();
            if count > 0 && best_band.map_or(true, |(_, best)| count > best) {
                best_band = Some((band, count));
            }
        }
        let orange = best_band.is_some_and(|(_, count)| count >= REGIONS_REQUIRED);

        let red = Self::red_criteria(contacts.iter());
        let gold = Self::red_criteria(contacts.iter().filter(|contact| contact.qrp));

        let current_level = [
            (MapleTier::Gold, gold.achieved),
            (MapleTier::Red, red.achieved),
            (MapleTier::Orange, orange),
            (MapleTier::Yellow, yellow),
        ]
        .into_iter()
        .find(|(_, achieved)| *achieved)
        .map(|(tier, _)| tier.label())
        .unwrap_or(NOT_YET)
        .to_string();

        ProgressReport::new(
            self.id(),
            regions_worked.len() as u64,
            REGIONS_REQUIRED,
            yellow,
            current_level.clone(),
            AwardDetails::Maple(MapleBreakdown {
                current_level,
                regions_worked,
                yellow,
                orange,
                best_band: best_band.map(|(band, _)| band.to_string()),
                regions_by_band,
                red,
                gold,
            }),
        )
    }

    fn requirements(&self) -> AwardRequirements {
        AwardRequirements {
            award: self.id(),
            name: self.id().label().to_string(),
            description: "Contact SKCC members in Canadian provinces and territories".to_string(),
            base_requirement: REGIONS_REQUIRED,
            units: "provinces and territories".to_string(),
            effective_date: Some(ymd(2009, 9, 1)),
            prerequisite: None,
            rules: vec![
                "CW only, HF bands 160 m to 10 m".to_string(),
                "Country must be Canada".to_string(),
                "Provinces count from 1 September 2009, territories from 1 January 2014"
                    .to_string(),
                "Yellow: 10 provinces or territories on any bands".to_string(),
                "Orange: 10 provinces or territories on a single band".to_string(),
                "Red: 90 contacts, 10 from each province, 10 on each of 9 HF bands".to_string(),
                "Gold: Red Maple using 5 W or less".to_string(),
            ],
        }
    }

    fn endorsement_tiers(&self) -> Vec<EndorsementTier> {
        vec![
            EndorsementTier::new(REGIONS_REQUIRED, MapleTier::Yellow.label()),
            EndorsementTier::new(REGIONS_REQUIRED, MapleTier::Orange.label()),
            EndorsementTier::new(RED_TOTAL, MapleTier::Red.label()),
            EndorsementTier::new(RED_TOTAL, MapleTier::Gold.label()),
        ]
    }
}
