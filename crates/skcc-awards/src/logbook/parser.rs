use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::str::FromStr;
use tracing::warn;

use super::ContactImportError;
use crate::awards::ContactRecord;

/// Columns a log export must carry; everything else is optional.
pub(crate) const REQUIRED_COLUMNS: [&str; 3] = ["callsign", "qso_date", "mode"];

pub(crate) fn parse_contacts<R: Read>(reader: R) -> Result<Vec<ContactRecord>, ContactImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(canonical_header)
        .collect();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(ContactImportError::MissingColumn(*missing));
    }
    csv_reader.set_headers(headers);

    let mut contacts = Vec::new();
    for (index, row) in csv_reader.deserialize::<ContactRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(line, error = %err, "skipping malformed contact row");
                continue;
            }
        };
        match row.into_record(line) {
            Some(record) => contacts.push(record),
            None => warn!(line, "skipping contact row without callsign"),
        }
    }

    Ok(contacts)
}

/// Lowercase, underscore-separated, with common ADIF and logger spellings folded.
fn canonical_header(raw: &str) -> String {
    let cleaned = raw.replace('\u{feff}', "");
    let folded = cleaned
        .trim()
        .to_ascii_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_");

    match folded.as_str() {
        "call" => "callsign",
        "date" | "qsodate" => "qso_date",
        "time" | "timeon" => "time_on",
        "skcc" | "skcc_nr" | "skccnr" | "member" => "member_number",
        "key" | "key_used" => "key_type",
        "tx_pwr" | "power" => "tx_power",
        "duration" | "minutes" => "duration_minutes",
        "comment" => "notes",
        "lotw_qsl_rcvd" | "lotw" => "lotw_rcvd",
        _ => return folded,
    }
    .to_string()
}

#[derive(Debug, Deserialize)]
struct ContactRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    callsign: Option<String>,
    #[serde(default)]
    qso_date: String,
    #[serde(default)]
    time_on: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    band: Option<String>,
    #[serde(default)]
    mode: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    member_number: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    key_type: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    country: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dxcc: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    tx_power: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    duration_minutes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    notes: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    qsl_rcvd: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    lotw_rcvd: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    distance: Option<String>,
}

impl ContactRow {
    fn into_record(self, line: usize) -> Option<ContactRecord> {
        let callsign = self.callsign?;
        Some(ContactRecord {
            qso_date: compact_digits(&self.qso_date),
            time_on: compact_digits(&self.time_on),
            band: self.band,
            mode: self.mode,
            member_number: self.member_number,
            key_type: self.key_type,
            country: self.country,
            state: self.state,
            dxcc: numeric(self.dxcc, "dxcc", line),
            tx_power: numeric(self.tx_power, "tx_power", line),
            duration_minutes: numeric(self.duration_minutes, "duration_minutes", line),
            notes: self.notes,
            qsl_rcvd: self.qsl_rcvd,
            lotw_rcvd: self.lotw_rcvd,
            distance: numeric(self.distance, "distance", line),
            callsign,
        })
    }
}

/// `2020-01-05` and `20200105` both become `20200105`; `18:30` becomes `1830`.
fn compact_digits(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.chars().all(|c| c.is_ascii_digit() || c == '-' || c == ':') {
        trimmed.replace(['-', ':'], "")
    } else {
        trimmed.to_string()
    }
}

fn numeric<T: FromStr>(value: Option<String>, column: &'static str, line: usize) -> Option<T> {
    let raw = value?;
    match raw.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(line, column, value = %raw, "ignoring unparseable number");
            None
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
