use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::identity::MemberIdentity;

/// Home DXCC entity assumed when no operator profile says otherwise (USA).
pub const DEFAULT_HOME_DXCC: u32 = 291;

/// Calendar date helper for rule cutoffs.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Mechanical keying devices accepted by the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyType {
    Straight,
    Bug,
    Sideswiper,
}

impl KeyType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Straight, Self::Bug, Self::Sideswiper]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Straight => "STRAIGHT",
            Self::Bug => "BUG",
            Self::Sideswiper => "SIDESWIPER",
        }
    }

    /// Accepts the canonical names plus the `SK`/`SS` exchange abbreviations.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "STRAIGHT" | "SK" => Some(Self::Straight),
            "BUG" => Some(Self::Bug),
            "SIDESWIPER" | "SS" => Some(Self::Sideswiper),
            _ => None,
        }
    }
}

/// What a record's key-type field says about the equipment used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAssessment {
    Mechanical(KeyType),
    Absent,
    Invalid,
}

impl KeyAssessment {
    /// Policy shared by most awards: mechanical or unrecorded.
    pub fn mechanical_or_absent(self) -> bool {
        !matches!(self, Self::Invalid)
    }

    pub fn recognized(self) -> Option<KeyType> {
        match self {
            Self::Mechanical(key) => Some(key),
            Self::Absent | Self::Invalid => None,
        }
    }
}

/// A single two-way contact as handed over by the log store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub callsign: String,
    /// `YYYYMMDD`
    pub qso_date: String,
    /// `HHMM`
    #[serde(default)]
    pub time_on: String,
    #[serde(default)]
    pub band: Option<String>,
    pub mode: String,
    #[serde(default)]
    pub member_number: Option<String>,
    #[serde(default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub dxcc: Option<u32>,
    #[serde(default)]
    pub tx_power: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub qsl_rcvd: Option<String>,
    #[serde(default)]
    pub lotw_rcvd: Option<String>,
    /// Nautical miles, consulted only for maritime-mobile stations.
    #[serde(default)]
    pub distance: Option<f64>,
}

impl ContactRecord {
    pub fn qso_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.qso_date.trim(), "%Y%m%d").ok()
    }

    /// True when the contact date is known and falls on or after `cutoff`.
    pub fn on_or_after(&self, cutoff: NaiveDate) -> bool {
        self.qso_date().is_some_and(|date| date >= cutoff)
    }

    pub fn is_cw(&self) -> bool {
        self.mode.trim().eq_ignore_ascii_case("CW")
    }

    pub fn identity(&self) -> Option<MemberIdentity> {
        self.member_number.as_deref().and_then(MemberIdentity::parse)
    }

    pub fn key(&self) -> KeyAssessment {
        match self.key_type.as_deref().map(str::trim) {
            None | Some("") => KeyAssessment::Absent,
            Some(raw) => KeyType::parse(raw)
                .map(KeyAssessment::Mechanical)
                .unwrap_or(KeyAssessment::Invalid),
        }
    }

    pub fn normalized_callsign(&self) -> String {
        self.callsign.trim().to_ascii_uppercase()
    }

    /// Callsign segment before the first `/`, uppercased.
    pub fn base_callsign(&self) -> String {
        let callsign = self.normalized_callsign();
        callsign
            .split('/')
            .next()
            .unwrap_or_default()
            .to_string()
    }

    pub fn band(&self) -> Option<String> {
        self.band
            .as_deref()
            .map(str::trim)
            .filter(|band| !band.is_empty())
            .map(str::to_ascii_uppercase)
    }

    pub fn band_or_unknown(&self) -> String {
        self.band().unwrap_or_else(|| "UNKNOWN".to_string())
    }

    pub fn state(&self) -> Option<String> {
        self.state
            .as_deref()
            .map(str::trim)
            .filter(|state| !state.is_empty())
            .map(str::to_ascii_uppercase)
    }

    /// Confirmed by paper QSL or LoTW.
    pub fn is_confirmed(&self) -> bool {
        let received = |flag: &Option<String>| {
            flag.as_deref()
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("Y"))
        };
        received(&self.qsl_rcvd) || received(&self.lotw_rcvd)
    }

    /// Chronological sort key; `time_on` breaks ties within a day.
    pub fn chronological_key(&self) -> (String, String) {
        (self.qso_date.trim().to_string(), self.time_on.trim().to_string())
    }
}

/// Every award the engine knows how to evaluate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AwardId {
    Centurion,
    Tribune,
    Senator,
    Was,
    Wac,
    CanadianMaple,
    Pfx,
    RagChew,
    TripleKey,
    DxccMixed,
    DxccCw,
    Dxq,
    Dxc,
}

impl AwardId {
    pub const fn ordered() -> [Self; 13] {
        [
            Self::Centurion,
            Self::Tribune,
            Self::Senator,
            Self::Was,
            Self::Wac,
            Self::CanadianMaple,
            Self::Pfx,
            Self::RagChew,
            Self::TripleKey,
            Self::DxccMixed,
            Self::DxccCw,
            Self::Dxq,
            Self::Dxc,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Centurion => "SKCC Centurion",
            Self::Tribune => "SKCC Tribune",
            Self::Senator => "SKCC Senator",
            Self::Was => "SKCC Worked All States",
            Self::Wac => "SKCC Worked All Continents",
            Self::CanadianMaple => "SKCC Canadian Maple",
            Self::Pfx => "SKCC Prefix (PFX)",
            Self::RagChew => "SKCC Rag Chew",
            Self::TripleKey => "SKCC Triple Key",
            Self::DxccMixed => "DXCC Mixed",
            Self::DxccCw => "DXCC CW",
            Self::Dxq => "SKCC DX (QSO)",
            Self::Dxc => "SKCC DX (Country)",
        }
    }

    /// Stable machine name, accepted by the registry.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Centurion => "centurion",
            Self::Tribune => "tribune",
            Self::Senator => "senator",
            Self::Was => "was",
            Self::Wac => "wac",
            Self::CanadianMaple => "canadian_maple",
            Self::Pfx => "pfx",
            Self::RagChew => "rag_chew",
            Self::TripleKey => "triple_key",
            Self::DxccMixed => "dxcc_mixed",
            Self::DxccCw => "dxcc_cw",
            Self::Dxq => "dxq",
            Self::Dxc => "dxc",
        }
    }
}

impl fmt::Display for AwardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The operator whose log is being evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorProfile {
    pub callsign: Option<String>,
    pub centurion_date: Option<NaiveDate>,
    pub tribune_x8_date: Option<NaiveDate>,
    pub home_dxcc: u32,
}

impl Default for OperatorProfile {
    fn default() -> Self {
        Self {
            callsign: None,
            centurion_date: None,
            tribune_x8_date: None,
            home_dxcc: DEFAULT_HOME_DXCC,
        }
    }
}

/// Human-readable description of what an award asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwardRequirements {
    pub award: AwardId,
    pub name: String,
    pub description: String,
    pub base_requirement: u64,
    pub units: String,
    pub effective_date: Option<NaiveDate>,
    pub prerequisite: Option<String>,
    pub rules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ContactRecord {
        ContactRecord {
            callsign: "w5lfa/p".to_string(),
            qso_date: "20240315".to_string(),
            time_on: "1830".to_string(),
            band: Some(" 20m ".to_string()),
            mode: "cw".to_string(),
            member_number: Some("1234T".to_string()),
            ..ContactRecord::default()
        }
    }

    #[test]
    fn key_aliases_and_absence_are_distinguished() {
        let mut contact = record();
        assert_eq!(contact.key(), KeyAssessment::Absent);

        contact.key_type = Some("ss".to_string());
        assert_eq!(contact.key(), KeyAssessment::Mechanical(KeyType::Sideswiper));

        contact.key_type = Some("SK".to_string());
        assert_eq!(contact.key(), KeyAssessment::Mechanical(KeyType::Straight));

        contact.key_type = Some("  ".to_string());
        assert_eq!(contact.key(), KeyAssessment::Absent);

        contact.key_type = Some("PADDLE".to_string());
        assert_eq!(contact.key(), KeyAssessment::Invalid);
        assert!(!contact.key().mechanical_or_absent());
    }

    #[test]
    fn normalizes_fields_for_rules() {
        let contact = record();
        assert!(contact.is_cw());
        assert_eq!(contact.base_callsign(), "W5LFA");
        assert_eq!(contact.band().as_deref(), Some("20M"));
        assert_eq!(contact.qso_date(), NaiveDate::from_ymd_opt(2024, 3, 15));
        assert!(contact.on_or_after(ymd(2024, 3, 15)));
        assert!(!contact.on_or_after(ymd(2024, 3, 16)));
        assert_eq!(
            contact.identity().map(|identity| identity.base),
            Some("1234".to_string())
        );
    }

    #[test]
    fn unparseable_dates_never_satisfy_cutoffs() {
        let mut contact = record();
        contact.qso_date = "2024-03-15".to_string();
        assert_eq!(contact.qso_date(), None);
        assert!(!contact.on_or_after(NaiveDate::MIN));
    }

    #[test]
    fn confirmation_accepts_either_channel() {
        let mut contact = record();
        assert!(!contact.is_confirmed());
        contact.lotw_rcvd = Some("y".to_string());
        assert!(contact.is_confirmed());
        contact.lotw_rcvd = Some("N".to_string());
        contact.qsl_rcvd = Some("Y".to_string());
        assert!(contact.is_confirmed());
    }
}
