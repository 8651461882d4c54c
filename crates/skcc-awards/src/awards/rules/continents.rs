//! Callsign prefix to IARU continent lookup for Worked All Continents.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Continent {
    #[serde(rename = "NA")]
    NorthAmerica,
    #[serde(rename = "SA")]
    SouthAmerica,
    #[serde(rename = "EU")]
    Europe,
    #[serde(rename = "AF")]
    Africa,
    #[serde(rename = "AS")]
    Asia,
    #[serde(rename = "OC")]
    Oceania,
}

impl Continent {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::NorthAmerica,
            Self::SouthAmerica,
            Self::Europe,
            Self::Africa,
            Self::Asia,
            Self::Oceania,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::NorthAmerica => "NA",
            Self::SouthAmerica => "SA",
            Self::Europe => "EU",
            Self::Africa => "AF",
            Self::Asia => "AS",
            Self::Oceania => "OC",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NorthAmerica => "North America",
            Self::SouthAmerica => "South America",
            Self::Europe => "Europe",
            Self::Africa => "Africa",
            Self::Asia => "Asia",
            Self::Oceania => "Oceania",
        }
    }
}

use Continent::{Africa as AF, Asia as AS, Europe as EU, NorthAmerica as NA, Oceania as OC,
    SouthAmerica as SA};

/// Known prefixes. Keys are unique; entries whose country spans continents
/// are assigned to the continent of the main landmass, and three-character
/// keys carve out offshore entities (`EA8`, `VP8`) from their parent prefix.
const PREFIXES: &[(&str, Continent)] = &[
    // North America
    ("K", NA), ("W", NA), ("N", NA),
    ("AA", NA), ("AB", NA), ("AC", NA), ("AD", NA), ("AE", NA), ("AF", NA), ("AG", NA),
    ("AI", NA), ("AJ", NA), ("AK", NA), ("KL", NA), ("KP", NA), ("WL", NA), ("WP", NA),
    ("VE", NA), ("VA", NA), ("VO", NA), ("VY", NA), ("XE", NA), ("XF", NA),
    ("VP", NA), ("V2", NA), ("V3", NA), ("V4", NA), ("FP", NA), ("CO", NA), ("HI", NA),
    ("HH", NA), ("TI", NA), ("TG", NA), ("YN", NA), ("HR", NA), ("YS", NA), ("HP", NA),
    ("6Y", NA), ("8P", NA), ("J3", NA), ("J6", NA), ("J7", NA), ("J8", NA), ("C6", NA),
    // South America
    ("PY", SA), ("PP", SA), ("PU", SA), ("ZV", SA), ("ZW", SA), ("ZX", SA), ("ZY", SA),
    ("ZZ", SA), ("PZ", SA), ("PJ", SA), ("P4", SA), ("YV", SA), ("HJ", SA), ("HK", SA),
    ("HC", SA), ("OA", SA), ("CP", SA), ("LU", SA), ("LW", SA), ("CE", SA), ("CX", SA),
    ("FY", SA), ("8R", SA), ("9Y", SA), ("ZP", SA), ("VP8", SA),
    // Europe
    ("G", EU), ("M", EU), ("F", EU), ("I", EU),
    ("GW", EU), ("GD", EU), ("GI", EU), ("GM", EU), ("GU", EU), ("GJ", EU), ("EI", EU),
    ("PA", EU), ("PB", EU), ("PD", EU), ("PE", EU), ("ON", EU), ("LX", EU),
    ("DL", EU), ("DA", EU), ("DB", EU), ("DC", EU), ("DD", EU), ("DF", EU), ("DG", EU),
    ("DJ", EU), ("DK", EU), ("DM", EU), ("DO", EU),
    ("HB", EU), ("HE", EU), ("OE", EU), ("OK", EU), ("OM", EU), ("HA", EU), ("HG", EU),
    ("SP", EU), ("SQ", EU), ("SN", EU), ("OZ", EU), ("SM", EU), ("SA", EU), ("SF", EU),
    ("LA", EU), ("LB", EU), ("OH", EU), ("ES", EU), ("YL", EU), ("LY", EU), ("EW", EU),
    ("UR", EU), ("US", EU), ("UT", EU), ("ER", EU), ("YO", EU), ("YR", EU), ("LZ", EU),
    ("SV", EU), ("SX", EU), ("J4", EU), ("9A", EU), ("S5", EU), ("E7", EU), ("YU", EU),
    ("YT", EU), ("Z3", EU), ("ZA", EU), ("9H", EU), ("T7", EU), ("T9", EU), ("HV", EU),
    ("IS", EU), ("IT", EU), ("IK", EU), ("IZ", EU), ("IW", EU),
    ("EA", EU), ("EB", EU), ("EC", EU), ("ED", EU), ("EE", EU), ("EF", EU), ("CT", EU),
    ("CU", EU), ("TA", EU), ("TC", EU), ("TF", EU), ("OY", EU),
    ("UA", EU), ("RA", EU), ("RK", EU), ("RN", EU), ("RU", EU), ("RV", EU), ("RW", EU),
    ("RX", EU), ("RZ", EU), ("R2", EU), ("R3", EU), ("R4", EU), ("R5", EU), ("R6", EU),
    ("R7", EU),
    // Africa
    ("ZS", AF), ("ZR", AF), ("ZT", AF), ("ZU", AF), ("CN", AF), ("SU", AF), ("S0", AF),
    ("7X", AF), ("3V", AF), ("5A", AF), ("ST", AF), ("ET", AF), ("5Z", AF), ("5H", AF),
    ("5X", AF), ("9J", AF), ("Z2", AF), ("A2", AF), ("V5", AF), ("D2", AF), ("9Q", AF),
    ("TJ", AF), ("TL", AF), ("TR", AF), ("TT", AF), ("TU", AF), ("TY", AF), ("TZ", AF),
    ("5N", AF), ("5U", AF), ("5V", AF), ("9G", AF), ("9L", AF), ("EL", AF), ("6W", AF),
    ("C5", AF), ("D4", AF), ("3X", AF), ("J5", AF), ("5R", AF), ("3B", AF), ("FR", AF),
    ("9U", AF), ("9X", AF), ("7Q", AF), ("C9", AF), ("7P", AF), ("3DA", AF), ("S9", AF),
    ("T5", AF), ("6O", AF), ("J2", AF), ("E3", AF), ("EA8", AF), ("EA9", AF), ("CT3", AF),
    // Asia
    ("JA", AS), ("JE", AS), ("JF", AS), ("JG", AS), ("JH", AS), ("JI", AS), ("JJ", AS),
    ("JK", AS), ("JL", AS), ("JM", AS), ("JN", AS), ("JO", AS), ("JP", AS), ("JQ", AS),
    ("JR", AS), ("JS", AS), ("7J", AS), ("7K", AS), ("7L", AS), ("7M", AS), ("7N", AS),
    ("8J", AS), ("8N", AS), ("JT", AS), ("HL", AS), ("DS", AS), ("6K", AS), ("P5", AS),
    ("BA", AS), ("BD", AS), ("BG", AS), ("BH", AS), ("BI", AS), ("BY", AS), ("BV", AS),
    ("BX", AS), ("VR", AS), ("XX", AS), ("HS", AS), ("E2", AS), ("XV", AS), ("3W", AS),
    ("XU", AS), ("XW", AS), ("XZ", AS), ("9M", AS), ("9V", AS), ("VU", AS), ("VT", AS),
    ("4S", AS), ("S2", AS), ("AP", AS), ("9N", AS), ("A5", AS), ("YA", AS), ("EP", AS),
    ("EK", AS), ("4J", AS), ("4K", AS), ("4L", AS), ("UN", AS), ("EX", AS), ("EY", AS),
    ("EZ", AS), ("UK", AS), ("4X", AS), ("4Z", AS), ("OD", AS), ("YK", AS), ("YI", AS),
    ("JY", AS), ("HZ", AS), ("7Z", AS), ("A4", AS), ("A6", AS), ("A7", AS), ("A9", AS),
    ("9K", AS), ("7O", AS), ("5B", AS), ("R8", AS), ("R9", AS), ("R0", AS), ("UA9", AS),
    ("UA0", AS),
    // Oceania
    ("VK", OC), ("VH", OC), ("VI", OC), ("VJ", OC), ("VL", OC), ("VM", OC), ("VN", OC),
    ("VZ", OC), ("AX", OC), ("ZL", OC), ("ZM", OC), ("ZK", OC), ("P2", OC), ("H4", OC),
    ("YJ", OC), ("FK", OC), ("FO", OC), ("FW", OC), ("3D2", OC), ("A3", OC), ("T2", OC),
    ("T3", OC), ("T8", OC), ("V6", OC), ("V7", OC), ("C2", OC), ("E5", OC), ("E6", OC),
    ("5W", OC), ("DU", OC), ("DV", OC), ("DW", OC), ("DX", OC), ("DY", OC), ("DZ", OC),
    ("4D", OC), ("4E", OC), ("4F", OC), ("4G", OC), ("4I", OC), ("YB", OC), ("YC", OC),
    ("YD", OC), ("YE", OC), ("YF", OC), ("YG", OC), ("YH", OC), ("4W", OC), ("JD", OC),
    ("KH0", OC), ("KH1", OC), ("KH2", OC), ("KH3", OC), ("KH4", OC), ("KH5", OC),
    ("KH6", OC), ("KH7", OC), ("KH8", OC), ("KH9", OC), ("NH6", OC), ("WH6", OC),
    ("AH6", OC), ("WH7", OC),
];

fn lookup(prefix: &str) -> Option<Continent> {
    PREFIXES
        .iter()
        .find(|(key, _)| *key == prefix)
        .map(|(_, continent)| *continent)
}

/// Resolve the operating location of `callsign` to a continent.
///
/// For portable calls the first `/` segment containing a digit is the one
/// that names the location (`DU3/W5LFA` operates from the Philippines). The
/// leading alphanumeric run of that segment is tried whole, then by its first
/// three, two and one characters, so the longest known prefix wins.
pub fn continent_for_callsign(callsign: &str) -> Option<Continent> {
    let callsign = callsign.trim().to_ascii_uppercase();
    let segment = callsign
        .split('/')
        .find(|part| part.chars().any(|c| c.is_ascii_digit()))
        .unwrap_or(callsign.as_str());

    let token: String = segment
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if token.is_empty() {
        return None;
    }

    let head = |len: usize| token.get(..len);

    lookup(&token)
        .or_else(|| head(3).and_then(lookup))
        .or_else(|| head(2).and_then(lookup))
        .or_else(|| head(1).and_then(lookup))
}
