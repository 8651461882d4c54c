use chrono::NaiveDate;
use std::borrow::Cow;
use std::collections::BTreeSet;
use tracing::debug;

use crate::awards::domain::{ymd, AwardId, ContactRecord};
use crate::awards::identity::MemberIdentity;
use crate::awards::AwardContext;

/// Club and special-event stations whose contacts stop counting after cutoffs.
pub const SPECIAL_EVENT_CALLS: [&str; 2] = ["K9SKC", "K3Y"];

pub(crate) fn centurion_special_event_cutoff() -> NaiveDate {
    ymd(2009, 12, 1)
}

pub(crate) fn tribune_effective_date() -> NaiveDate {
    ymd(2007, 3, 1)
}

pub(crate) fn tribune_special_event_cutoff() -> NaiveDate {
    ymd(2008, 10, 1)
}

pub(crate) fn senator_effective_date() -> NaiveDate {
    ymd(2013, 8, 1)
}

/// Reason a record was turned away.
pub(crate) type Rejection = Cow<'static, str>;

pub(crate) type Verdict<T> = Result<T, Rejection>;

/// Collapse a verdict into the boolean contract, logging the reason.
pub(crate) fn settle<T>(award: AwardId, record: &ContactRecord, verdict: Verdict<T>) -> Option<T> {
    match verdict {
        Ok(value) => Some(value),
        Err(reason) => {
            debug!(
                award = award.slug(),
                callsign = %record.callsign,
                qso_date = %record.qso_date,
                %reason,
                "contact rejected"
            );
            None
        }
    }
}

pub(crate) fn is_special_event(record: &ContactRecord) -> bool {
    let base = record.base_callsign();
    SPECIAL_EVENT_CALLS.iter().any(|call| *call == base)
}

/// Special-event call worked on or after `cutoff`. Undated contacts with a
/// special-event call are treated as falling after it.
pub(crate) fn special_event_after(record: &ContactRecord, cutoff: NaiveDate) -> bool {
    is_special_event(record) && record.qso_date().map_or(true, |date| date >= cutoff)
}

/// CW mode plus a parseable member number: the floor every SKCC award shares.
pub(crate) fn cw_member(record: &ContactRecord) -> Verdict<MemberIdentity> {
    if !record.is_cw() {
        return Err(format!("mode {} is not CW", record.mode.trim()).into());
    }
    record
        .identity()
        .ok_or_else(|| Rejection::from("missing or unparseable member number"))
}

pub(crate) fn mechanical_or_absent_key(record: &ContactRecord) -> Verdict<()> {
    if record.key().mechanical_or_absent() {
        Ok(())
    } else {
        Err(format!(
            "key type {} is not mechanical",
            record.key_type.as_deref().unwrap_or_default()
        )
        .into())
    }
}

pub(crate) fn on_or_after(record: &ContactRecord, cutoff: NaiveDate, what: &str) -> Verdict<()> {
    match record.qso_date() {
        Some(date) if date >= cutoff => Ok(()),
        Some(date) => Err(format!("{date} precedes {what} {cutoff}").into()),
        None => Err(format!("unparseable contact date {:?}", record.qso_date).into()),
    }
}

/// Distinct base identities among records that pass `check`.
pub(crate) fn distinct_members<F>(
    records: &[ContactRecord],
    ctx: &AwardContext,
    mut check: F,
) -> BTreeSet<String>
where
    F: FnMut(&ContactRecord, &AwardContext) -> Option<MemberIdentity>,
{
    records
        .iter()
        .filter_map(|record| check(record, ctx))
        .map(|identity| identity.base)
        .collect()
}
