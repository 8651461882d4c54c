//! Memoization for the shell around the award engine.
//!
//! Entries are keyed by award plus a SHA-256 digest of the serialized log
//! snapshot and operator profile, so any edit to the log produces a new key.
//! The roster is not part of the key; call [`ProgressCache::clear`] after a
//! roster refresh.

use chrono::{DateTime, Duration, Utc};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

use crate::awards::{AwardId, ContactRecord, OperatorProfile, ProgressReport};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    award: AwardId,
    snapshot: String,
}

#[derive(Debug, Clone)]
struct CacheEntry {
    report: ProgressReport,
    expires_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ProgressCache {
    ttl: Duration,
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
}

impl ProgressCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Hex SHA-256 of the snapshot, or `None` if it cannot be serialized.
    pub fn snapshot_hash(records: &[ContactRecord], operator: &OperatorProfile) -> Option<String> {
        let mut hasher = Sha256::new();
        match (serde_json::to_vec(records), serde_json::to_vec(operator)) {
            (Ok(records), Ok(operator)) => {
                hasher.update(&records);
                hasher.update(&operator);
                Some(format!("{:x}", hasher.finalize()))
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "snapshot not serializable; skipping cache");
                None
            }
        }
    }

    /// Cached report for `award` over this snapshot, computing it with `compute` on a miss.
    pub fn get_or_compute<F>(
        &self,
        award: AwardId,
        records: &[ContactRecord],
        operator: &OperatorProfile,
        now: DateTime<Utc>,
        compute: F,
    ) -> ProgressReport
    where
        F: FnOnce() -> ProgressReport,
    {
        let Some(snapshot) = Self::snapshot_hash(records, operator) else {
            return compute();
        };
        let key = CacheKey { award, snapshot };

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get(&key) {
            if entry.expires_at > now {
                debug!(award = award.slug(), "progress cache hit");
                return entry.report.clone();
            }
        }

        debug!(award = award.slug(), "progress cache miss");
        let report = compute();
        entries.insert(
            key,
            CacheEntry {
                report: report.clone(),
                expires_at: now + self.ttl,
            },
        );
        report
    }

    /// Drop entries that have expired as of `now`.
    pub fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        before - entries.len()
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::awards::{AwardDetails, ProgressReport};
    use std::cell::Cell;

    fn report(current: u64) -> ProgressReport {
        ProgressReport::new(
            AwardId::Centurion,
            current,
            100,
            false,
            "Not Yet",
            AwardDetails::Members {
                unique_members: Default::default(),
            },
        )
    }

    fn log(member: &str) -> Vec<ContactRecord> {
        vec![ContactRecord {
            callsign: "W1AW".to_string(),
            qso_date: "20200101".to_string(),
            mode: "CW".to_string(),
            member_number: Some(member.to_string()),
            ..ContactRecord::default()
        }]
    }

    #[test]
    fn identical_snapshot_is_served_from_cache() {
        let cache = ProgressCache::new(Duration::seconds(60));
        let operator = OperatorProfile::default();
        let now = Utc::now();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            report(1)
        };

        cache.get_or_compute(AwardId::Centurion, &log("1"), &operator, now, compute);
        let cached = cache.get_or_compute(AwardId::Centurion, &log("1"), &operator, now, compute);

        assert_eq!(calls.get(), 1);
        assert_eq!(cached.current, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changed_snapshot_or_award_misses() {
        let cache = ProgressCache::new(Duration::seconds(60));
        let operator = OperatorProfile::default();
        let now = Utc::now();

        cache.get_or_compute(AwardId::Centurion, &log("1"), &operator, now, || report(1));
        let fresh = cache.get_or_compute(AwardId::Centurion, &log("2"), &operator, now, || report(2));
        cache.get_or_compute(AwardId::Tribune, &log("1"), &operator, now, || report(3));

        assert_eq!(fresh.current, 2);
        assert_eq!(cache.len(), 3);

        let moved = OperatorProfile {
            home_dxcc: 1,
            ..OperatorProfile::default()
        };
        assert_ne!(
            ProgressCache::snapshot_hash(&log("1"), &operator),
            ProgressCache::snapshot_hash(&log("1"), &moved)
        );
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = ProgressCache::new(Duration::seconds(60));
        let operator = OperatorProfile::default();
        let start = Utc::now();

        cache.get_or_compute(AwardId::Centurion, &log("1"), &operator, start, || report(1));
        let later = start + Duration::seconds(61);
        let recomputed =
            cache.get_or_compute(AwardId::Centurion, &log("1"), &operator, later, || report(7));
        assert_eq!(recomputed.current, 7);

        assert_eq!(cache.evict_expired(later + Duration::seconds(120)), 1);
        assert!(cache.is_empty());
    }
}
