use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::warn;

use crate::awards::identity::{extract_base_identity, Designation};

/// One accepted row from a club achievement list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RosterRow {
    pub(crate) callsign: String,
    pub(crate) base: String,
    pub(crate) achieved_on: Option<NaiveDate>,
}

/// Parse a pipe-delimited roster feed:
/// `rank|call|skccnr|name|city|state|date|endorsements`.
pub(crate) fn parse_feed<R: Read>(
    reader: R,
    designation: Designation,
) -> Result<Vec<RosterRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        if is_header(&record) {
            continue;
        }
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let parsed: FeedRow = match record.deserialize(None) {
            Ok(row) => row,
            Err(err) => {
                warn!(
                    list = designation.label(),
                    line = line + 1,
                    error = %err,
                    "skipping malformed roster row"
                );
                continue;
            }
        };

        match parsed.into_row() {
            Some(row) => rows.push(row),
            None => warn!(
                list = designation.label(),
                line = line + 1,
                "skipping roster row without callsign or member number"
            ),
        }
    }

    Ok(rows)
}

fn is_header(record: &csv::StringRecord) -> bool {
    let first = record.get(0).unwrap_or_default().to_ascii_lowercase();
    let second = record.get(1).unwrap_or_default().to_ascii_lowercase();
    matches!(first.as_str(), "cnr" | "tnr" | "senatornr") && second == "call"
}

#[derive(Debug, Deserialize)]
struct FeedRow {
    _rank: String,
    call: String,
    skccnr: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    _name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    _city: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    _state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    _endorsements: Option<String>,
}

impl FeedRow {
    fn into_row(self) -> Option<RosterRow> {
        let callsign = self.call.trim().to_ascii_uppercase();
        if callsign.is_empty() {
            return None;
        }
        let base = extract_base_identity(&self.skccnr)?;

        let achieved_on = self.date.as_deref().and_then(|raw| {
            let parsed = parse_roster_date(raw);
            if parsed.is_none() {
                warn!(%callsign, date = raw, "unparseable roster achievement date");
            }
            parsed
        });

        Some(RosterRow {
            callsign,
            base,
            achieved_on,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Roster dates are written `DD Mon YYYY`.
pub fn parse_roster_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%d %b %Y").ok()
}
