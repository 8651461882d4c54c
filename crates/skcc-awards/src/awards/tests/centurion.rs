use super::common::*;
use crate::awards::rules::CenturionRule;
use crate::awards::{AwardDetails, NOT_YET};

#[test]
fn suffixes_and_multipliers_collapse_to_one_member() {
    let rule = rule("centurion");
    let ctx = context();
    let records = vec![
        contact("AC2C", "3", "20100101"),
        contact("AC2C", "3C", "20110101"),
        contact("AC2C", "3Tx8", "20120101"),
        contact("AC2C", "3S", "20130101"),
        contact("W1AW", "42", "20130101"),
    ];

    let report = rule.calculate_progress(&records, &ctx);

    assert_eq!(report.current, 2);
    match report.details {
        AwardDetails::Members { unique_members } => {
            assert!(unique_members.contains("3"));
            assert!(unique_members.contains("42"));
        }
        other => panic!("expected member details, got {other:?}"),
    }
}

#[test]
fn key_policy_accepts_absent_and_rejects_electronic() {
    let rule = rule("centurion");
    let ctx = context();

    let mut absent = contact("W1AW", "100", "20150101");
    absent.key_type = None;
    assert!(rule.validate(&absent, &ctx));

    let mut abbreviated = contact("W1AW", "100", "20150101");
    abbreviated.key_type = Some("ss".to_string());
    assert!(rule.validate(&abbreviated, &ctx));

    let mut keyer = contact("W1AW", "100", "20150101");
    keyer.key_type = Some("ELECTRONIC".to_string());
    assert!(!rule.validate(&keyer, &ctx));

    let mut phone = contact("W1AW", "100", "20150101");
    phone.mode = "SSB".to_string();
    assert!(!rule.validate(&phone, &ctx));
}

#[test]
fn special_event_stations_stop_counting_in_december_2009() {
    let rule = rule("centurion");
    let ctx = context();

    assert!(rule.validate(&contact("K9SKC", "1", "20091130"), &ctx));
    assert!(!rule.validate(&contact("K9SKC", "1", "20091201"), &ctx));
    assert!(!rule.validate(&contact("K3Y/0", "1", "20240105"), &ctx));
}

#[test]
fn progress_tracks_the_next_milestone() {
    let rule = rule("centurion");
    let ctx = context();

    let below = rule.calculate_progress(&distinct_contacts(1, 50, "20200101"), &ctx);
    assert_eq!(below.required, 100);
    assert_eq!(below.endorsement, NOT_YET);
    assert!(!below.achieved);
    assert_eq!(below.percentage, 50.0);

    let past = rule.calculate_progress(&distinct_contacts(1, 150, "20200101"), &ctx);
    assert_eq!(past.current, 150);
    assert_eq!(past.required, 200);
    assert_eq!(past.endorsement, "Centurion");
    assert!(past.achieved);
}

#[test]
fn endorsement_labels_at_tier_boundaries() {
    let rule = rule("centurion");
    let ctx = context();

    let at_200 = rule.calculate_progress(&distinct_contacts(1, 200, "20200101"), &ctx);
    assert_eq!(at_200.endorsement, "Centurion x2");

    let tiers = rule.endorsement_tiers();
    assert_eq!(tiers[0].threshold, 100);
    assert_eq!(tiers[9].label, "Centurion x10");
    assert_eq!(tiers[10].label, "Centurion x15");
    assert_eq!(tiers[10].threshold, 1500);
}

#[test]
fn achievement_date_is_the_hundredth_distinct_member() {
    let rule = CenturionRule::new().expect("valid ladder");
    let mut records = distinct_contacts(1, 99, "20200101");
    records.push(contact("W1AW", "5", "20200301"));
    records.push(contact("K1ZZ", "500", "20200415"));
    records.push(contact("K1ZZ", "501", "20200520"));

    assert_eq!(rule.achievement_date(&records), Some(date(2020, 4, 15)));
    assert_eq!(rule.achievement_date(&records[..99]), None);
}
