use std::sync::Arc;

use super::common::*;
use crate::awards::domain::OperatorProfile;
use crate::awards::identity::Designation;
use crate::awards::rules::TribuneRule;
use crate::awards::{AwardContext, AwardDetails};
use crate::roster::{MemberStanding, RosterError, RosterLookup};

struct OfflineRoster;

impl RosterLookup for OfflineRoster {
    fn standing(&self, _base: &str) -> Result<Option<MemberStanding>, RosterError> {
        Err(RosterError::Unavailable {
            reason: "feed not downloaded".to_string(),
        })
    }
}

fn centurion_operator() -> OperatorProfile {
    OperatorProfile {
        centurion_date: Some(date(2012, 1, 1)),
        ..OperatorProfile::default()
    }
}

#[test]
fn tribune_without_roster_fails_closed() {
    let rule = rule("tribune");
    assert!(!rule.validate(&contact("W1AW", "5C", "20130101"), &context()));

    let offline = AwardContext::new(centurion_operator()).with_roster(Arc::new(OfflineRoster));
    assert!(!rule.validate(&contact("W1AW", "5C", "20130101"), &offline));
}

#[test]
fn tribune_requires_centurion_prerequisite() {
    let rule = rule("tribune");
    let ctx = context_with(
        centurion_operator(),
        roster(1, 60, Designation::Centurion, date(2010, 1, 1)),
    );
    let mut records = distinct_contacts(1, 60, "20130101");

    let pending = rule.calculate_progress(&records, &ctx);
    assert_eq!(pending.current, 60);
    assert!(!pending.achieved);
    match &pending.details {
        AwardDetails::Tribune {
            centurion_count,
            is_centurion,
            ..
        } => {
            assert_eq!(*centurion_count, 60);
            assert!(!is_centurion);
        }
        other => panic!("expected tribune details, got {other:?}"),
    }

    records.extend(distinct_contacts(1000, 100, "20110101"));
    let earned = rule.calculate_progress(&records, &ctx);
    assert_eq!(earned.current, 60);
    assert!(earned.achieved);
    assert_eq!(earned.endorsement, "Tribune");
    assert_eq!(earned.required, 100);
}

#[test]
fn tribune_checks_both_centurion_dates() {
    let rule = rule("tribune");
    let mut roster = roster(1, 5, Designation::Centurion, date(2010, 1, 1));
    roster.insert(standing("77", Designation::Tribune, date(2014, 6, 1)));
    let ctx = context_with(centurion_operator(), roster);

    assert!(rule.validate(&contact("W1AW", "3", "20120101"), &ctx));
    assert!(!rule.validate(&contact("W1AW", "3", "20111231"), &ctx));
    assert!(!rule.validate(&contact("K1ZZ", "77T", "20140101"), &ctx));
    assert!(rule.validate(&contact("K1ZZ", "77T", "20140601"), &ctx));
    assert!(!rule.validate(&contact("N0CALL", "9999", "20140601"), &ctx));
}

#[test]
fn tribune_special_event_cutoff_is_october_2008() {
    let rule = rule("tribune");
    let roster = roster(1, 1, Designation::Centurion, date(2007, 1, 1));
    let ctx = context_with(OperatorProfile::default(), roster);

    assert!(rule.validate(&contact("K9SKC", "1", "20080930"), &ctx));
    assert!(!rule.validate(&contact("K9SKC", "1", "20081001"), &ctx));
    assert!(!rule.validate(&contact("W1AW", "1", "20070228"), &ctx));
}

#[test]
fn senator_needs_operator_tribune_x8_date() {
    let rule = rule("senator");
    let roster = roster(1, 10, Designation::Tribune, date(2013, 9, 1));
    let ctx = context_with(OperatorProfile::default(), roster.clone());
    assert!(!rule.validate(&contact("W1AW", "5T", "20150101"), &ctx));

    let operator = OperatorProfile {
        tribune_x8_date: Some(date(2014, 1, 1)),
        ..OperatorProfile::default()
    };
    let ctx = context_with(operator, roster);
    assert!(rule.validate(&contact("W1AW", "5T", "20150101"), &ctx));
    assert!(!rule.validate(&contact("W1AW", "5T", "20131201"), &ctx));
}

#[test]
fn senator_counts_only_tribunes_and_senators() {
    let rule = rule("senator");
    let mut roster = roster(1, 10, Designation::Tribune, date(2013, 9, 1));
    roster.insert(standing("11", Designation::Centurion, date(2010, 1, 1)));
    roster.insert(standing("12", Designation::Senator, date(2016, 1, 1)));
    let operator = OperatorProfile {
        tribune_x8_date: Some(date(2014, 1, 1)),
        ..OperatorProfile::default()
    };
    let ctx = context_with(operator, roster);

    let records = vec![
        contact("W1AW", "5T", "20150101"),
        contact("W1AW", "5T", "20150202"),
        contact("K1ZZ", "11C", "20150101"),
        contact("K9SKC", "6T", "20150101"),
        contact("N2XX", "12S", "20170101"),
    ];
    let report = rule.calculate_progress(&records, &ctx);

    assert_eq!(report.current, 2);
    assert!(!report.achieved);
    assert_eq!(report.required, 200);
    match report.details {
        AwardDetails::Senator {
            unique_members,
            is_tribune_x8,
            tribune_x8_date,
            ..
        } => {
            assert!(unique_members.contains("5"));
            assert!(unique_members.contains("12"));
            assert!(!is_tribune_x8);
            assert_eq!(tribune_x8_date, Some(date(2014, 1, 1)));
        }
        other => panic!("expected senator details, got {other:?}"),
    }
}

fn tribune_x8_operator() -> OperatorProfile {
    OperatorProfile {
        centurion_date: Some(date(2012, 1, 1)),
        tribune_x8_date: Some(date(2014, 1, 1)),
        ..OperatorProfile::default()
    }
}

#[test]
fn senator_without_roster_fails_closed() {
    let rule = rule("senator");
    let record = contact("W1AW", "5T", "20150101");

    assert!(!rule.validate(&record, &AwardContext::new(tribune_x8_operator())));

    let offline = AwardContext::new(tribune_x8_operator()).with_roster(Arc::new(OfflineRoster));
    assert!(!rule.validate(&record, &offline));
    let report = rule.calculate_progress(&[record], &offline);
    assert_eq!(report.current, 0);
    assert!(!report.achieved);
}

#[test]
fn senator_is_earned_after_tribune_x8_with_200_members() {
    let rule = rule("senator");
    let ctx = context_with(
        tribune_x8_operator(),
        roster(1, 400, Designation::Tribune, date(2013, 9, 1)),
    );
    let records = distinct_contacts(1, 400, "20150101");

    let report = rule.calculate_progress(&records, &ctx);

    assert_eq!(report.current, 400);
    assert!(report.achieved);
    assert_eq!(report.endorsement, "Senator x2");
    match report.details {
        AwardDetails::Senator {
            tribune_count,
            is_tribune_x8,
            ..
        } => {
            assert_eq!(tribune_count, 400);
            assert!(is_tribune_x8);
        }
        other => panic!("expected senator details, got {other:?}"),
    }
}

#[test]
fn tribune_x8_date_is_the_400th_eligible_member() {
    let tribune = TribuneRule::new().expect("ladder is valid");
    let ctx = context_with(
        centurion_operator(),
        roster(1, 400, Designation::Tribune, date(2010, 1, 1)),
    );
    let mut records = distinct_contacts(1, 399, "20140101");
    records.extend(distinct_contacts(401, 5, "20140201"));
    assert_eq!(tribune.x8_achievement_date(&records, &ctx), None);

    records.extend(distinct_contacts(400, 1, "20140315"));
    records.extend(distinct_contacts(1, 3, "20140401"));
    assert_eq!(
        tribune.x8_achievement_date(&records, &ctx),
        Some(date(2014, 3, 15))
    );
    assert_eq!(tribune.x8_achievement_date(&records, &context()), None);
}
