//! Contact log import from CSV exports.
//!
//! Header names are folded to the [`ContactRecord`] field names, so the
//! common logger spellings (`CALL`, `QSO Date`, `SKCC`, `TX_PWR`) all load.
//! Blank cells become `None`; rows that cannot be read are skipped with a
//! warning rather than failing the whole import.

mod parser;

use std::io::Read;
use std::path::Path;
use tracing::info;

use crate::awards::ContactRecord;

#[derive(Debug)]
pub enum ContactImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for ContactImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactImportError::Io(err) => write!(f, "failed to read contact log: {}", err),
            ContactImportError::Csv(err) => write!(f, "invalid contact log CSV data: {}", err),
            ContactImportError::MissingColumn(column) => {
                write!(f, "contact log has no '{}' column", column)
            }
        }
    }
}

impl std::error::Error for ContactImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ContactImportError::Io(err) => Some(err),
            ContactImportError::Csv(err) => Some(err),
            ContactImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for ContactImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ContactImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ContactLogImporter;

impl ContactLogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ContactRecord>, ContactImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let contacts = Self::from_reader(std::io::BufReader::new(file))?;
        info!(path = %path.display(), contacts = contacts.len(), "contact log loaded");
        Ok(contacts)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ContactRecord>, ContactImportError> {
        parser::parse_contacts(reader)
    }
}
