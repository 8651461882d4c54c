use std::sync::Arc;

use chrono::NaiveDate;

use crate::awards::domain::{ContactRecord, OperatorProfile};
use crate::awards::identity::Designation;
use crate::awards::{AwardContext, AwardRegistry, AwardRule, SharedRoster};
use crate::roster::{MemberRoster, MemberStanding};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// CW contact with a straight key, the shape most rules accept.
pub(super) fn contact(callsign: &str, member: &str, qso_date: &str) -> ContactRecord {
    ContactRecord {
        callsign: callsign.to_string(),
        qso_date: qso_date.to_string(),
        time_on: "1200".to_string(),
        band: Some("40M".to_string()),
        mode: "CW".to_string(),
        member_number: Some(member.to_string()),
        key_type: Some("STRAIGHT".to_string()),
        ..ContactRecord::default()
    }
}

/// `count` contacts with distinct member numbers starting at `first`.
pub(super) fn distinct_contacts(first: u64, count: u64, qso_date: &str) -> Vec<ContactRecord> {
    (first..first + count)
        .map(|number| contact(&format!("W{}AB", number % 10), &number.to_string(), qso_date))
        .collect()
}

pub(super) fn standing(base: &str, designation: Designation, achieved_on: NaiveDate) -> MemberStanding {
    let mut standing = MemberStanding {
        base: base.to_string(),
        highest: Some(designation),
        ..MemberStanding::default()
    };
    if designation >= Designation::Centurion {
        standing.centurion_date = Some(achieved_on);
    }
    if designation >= Designation::Tribune {
        standing.tribune_date = Some(achieved_on);
    }
    if designation == Designation::Senator {
        standing.senator_date = Some(achieved_on);
    }
    standing
}

/// Roster where member numbers `first..first + count` hold `designation` since `achieved_on`.
pub(super) fn roster(
    first: u64,
    count: u64,
    designation: Designation,
    achieved_on: NaiveDate,
) -> MemberRoster {
    let mut roster = MemberRoster::new();
    for number in first..first + count {
        roster.insert(standing(&number.to_string(), designation, achieved_on));
    }
    roster
}

pub(super) fn shared(roster: MemberRoster) -> SharedRoster {
    Arc::new(roster)
}

pub(super) fn context() -> AwardContext {
    AwardContext::new(OperatorProfile::default())
}

pub(super) fn context_with(operator: OperatorProfile, roster: MemberRoster) -> AwardContext {
    AwardContext::new(operator).with_roster(shared(roster))
}

pub(super) fn rule(name: &str) -> Box<dyn AwardRule> {
    AwardRegistry::new()
        .resolve(name)
        .expect("award is registered")
}
