//! Read-only membership roster consulted by the Tribune and Senator rules.
//!
//! The club publishes three achievement lists (Centurion, Tribune, Senator).
//! [`MemberRoster`] merges them into one snapshot keyed by base member number;
//! the engine only sees it through [`RosterLookup`].

mod parser;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

use crate::awards::identity::Designation;

pub use parser::parse_roster_date;

/// What the rosters record about one member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberStanding {
    pub base: String,
    pub callsign: Option<String>,
    pub centurion_date: Option<NaiveDate>,
    pub tribune_date: Option<NaiveDate>,
    pub senator_date: Option<NaiveDate>,
    pub highest: Option<Designation>,
}

impl MemberStanding {
    fn record(&mut self, designation: Designation, callsign: String, date: Option<NaiveDate>) {
        if self.callsign.is_none() {
            self.callsign = Some(callsign);
        }
        match designation {
            Designation::Centurion => self.centurion_date = self.centurion_date.or(date),
            Designation::Tribune => self.tribune_date = self.tribune_date.or(date),
            Designation::Senator => self.senator_date = self.senator_date.or(date),
        }
        self.highest = self.highest.max(Some(designation));
    }
}

/// Roster backend failure. Rules treat it as "not eligible".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("membership roster unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Lookup seam between the award rules and whatever holds the rosters.
pub trait RosterLookup {
    fn standing(&self, base: &str) -> Result<Option<MemberStanding>, RosterError>;

    /// Centurion, Tribune or Senator.
    fn is_centurion_or_higher(&self, base: &str) -> Result<bool, RosterError> {
        Ok(self
            .standing(base)?
            .is_some_and(|standing| standing.highest.is_some()))
    }

    fn is_in_tribune_or_senator_roster(&self, base: &str) -> Result<bool, RosterError> {
        Ok(self
            .standing(base)?
            .is_some_and(|standing| standing.highest >= Some(Designation::Tribune)))
    }

    fn centurion_date(&self, base: &str) -> Result<Option<NaiveDate>, RosterError> {
        Ok(self
            .standing(base)?
            .and_then(|standing| standing.centurion_date))
    }

    fn tribune_date(&self, base: &str) -> Result<Option<NaiveDate>, RosterError> {
        Ok(self.standing(base)?.and_then(|standing| standing.tribune_date))
    }
}

/// File names the club uses for its published lists.
pub const CENTURION_LIST_FILE: &str = "centurionlist.txt";
pub const TRIBUNE_LIST_FILE: &str = "tribunelist.txt";
pub const SENATOR_LIST_FILE: &str = "senator.txt";

#[derive(Debug)]
pub enum RosterImportError {
    Io {
        list: Designation,
        source: std::io::Error,
    },
    Csv {
        list: Designation,
        source: csv::Error,
    },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io { list, source } => {
                write!(f, "failed to read {} roster: {}", list.label(), source)
            }
            RosterImportError::Csv { list, source } => {
                write!(f, "invalid {} roster data: {}", list.label(), source)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io { source, .. } => Some(source),
            RosterImportError::Csv { source, .. } => Some(source),
        }
    }
}

/// Immutable in-memory roster snapshot.
#[derive(Debug, Clone, Default)]
pub struct MemberRoster {
    members: HashMap<String, MemberStanding>,
}

impl MemberRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one published list into the snapshot.
    pub fn with_feed<R: Read>(
        mut self,
        designation: Designation,
        reader: R,
    ) -> Result<Self, RosterImportError> {
        let rows = parser::parse_feed(reader, designation).map_err(|source| {
            RosterImportError::Csv {
                list: designation,
                source,
            }
        })?;
        let imported = rows.len();

        for row in rows {
            let standing = self
                .members
                .entry(row.base.clone())
                .or_insert_with(|| MemberStanding {
                    base: row.base.clone(),
                    ..MemberStanding::default()
                });
            standing.record(designation, row.callsign, row.achieved_on);
        }

        info!(list = designation.label(), imported, "roster feed loaded");
        Ok(self)
    }

    pub fn with_feed_path(
        self,
        designation: Designation,
        path: impl AsRef<Path>,
    ) -> Result<Self, RosterImportError> {
        let file = File::open(path).map_err(|source| RosterImportError::Io {
            list: designation,
            source,
        })?;
        self.with_feed(designation, BufReader::new(file))
    }

    /// Load whichever of the three published lists exist in `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, RosterImportError> {
        let dir = dir.as_ref();
        let mut roster = Self::new();
        for (designation, file_name) in [
            (Designation::Centurion, CENTURION_LIST_FILE),
            (Designation::Tribune, TRIBUNE_LIST_FILE),
            (Designation::Senator, SENATOR_LIST_FILE),
        ] {
            let path = dir.join(file_name);
            if path.is_file() {
                roster = roster.with_feed_path(designation, path)?;
            }
        }
        Ok(roster)
    }

    /// Direct insertion, used when the caller already holds parsed standings.
    pub fn insert(&mut self, standing: MemberStanding) {
        self.members.insert(standing.base.clone(), standing);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl RosterLookup for MemberRoster {
    fn standing(&self, base: &str) -> Result<Option<MemberStanding>, RosterError> {
        Ok(self.members.get(base).cloned())
    }
}
