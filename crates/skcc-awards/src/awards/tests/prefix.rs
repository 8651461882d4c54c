use super::common::*;
use crate::awards::AwardDetails;

#[test]
fn each_prefix_scores_its_highest_member_number() {
    let rule = rule("pfx");
    let records = vec![
        contact("W5LFA", "1000", "20200101"),
        contact("DU3/W5XYZ", "5000T", "20200102"),
        contact("K5ZMD/7", "2500C", "20200103"),
    ];

    let report = rule.calculate_progress(&records, &context());

    assert_eq!(report.current, 7500);
    match report.details {
        AwardDetails::Prefixes {
            points_by_prefix,
            contacts_by_prefix,
        } => {
            assert_eq!(points_by_prefix.get("W5"), Some(&5000));
            assert_eq!(points_by_prefix.get("K5"), Some(&2500));
            assert_eq!(contacts_by_prefix.get("W5"), Some(&2));
        }
        other => panic!("expected prefix details, got {other:?}"),
    }
}

#[test]
fn prefix_points_exclude_special_events_and_early_contacts() {
    let rule = rule("prefix points");
    let ctx = context();

    assert!(rule.validate(&contact("W5LFA", "1000", "20130101"), &ctx));
    assert!(!rule.validate(&contact("W5LFA", "1000", "20121231"), &ctx));
    assert!(!rule.validate(&contact("K9SKC", "1", "20200101"), &ctx));
    assert!(!rule.validate(&contact("NOCALL", "1", "20200101"), &ctx));
}

#[test]
fn px_levels_step_every_half_million() {
    let rule = rule("pfx");
    let records: Vec<_> = (0..12)
        .map(|n| contact(&format!("K{n}AA"), "250000", "20200101"))
        .chain((0..5).map(|n| contact(&format!("W{n}AA"), "100000", "20200101")))
        .collect();

    let report = rule.calculate_progress(&records, &context());

    assert_eq!(report.current, 3_000_000 + 500_000);
    assert_eq!(report.endorsement, "Px7");
    assert_eq!(report.required, 4_000_000);
    assert!(report.achieved);
}

#[test]
fn huge_member_numbers_saturate_instead_of_overflowing() {
    let rule = rule("pfx");
    let records = vec![
        contact("W5LFA", "18446744073709551615", "20200101"),
        contact("K5ZMD", "18446744073709551615", "20200101"),
    ];

    let report = rule.calculate_progress(&records, &context());

    assert_eq!(report.current, u64::MAX);
    assert!(report.achieved);
    assert_eq!(report.required, u64::MAX);
    assert_eq!(report.percentage, 100.0);
}
