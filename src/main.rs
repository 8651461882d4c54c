use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use skcc_awards::awards::rules::{CenturionRule, TribuneRule};
use skcc_awards::awards::{
    AwardContext, AwardError, AwardId, AwardRegistry, ContactRecord, Designation, EndorsementTier,
    ProgressReport,
};
use skcc_awards::cache::ProgressCache;
use skcc_awards::config::AppConfig;
use skcc_awards::error::AppError;
use skcc_awards::logbook::ContactLogImporter;
use skcc_awards::roster::MemberRoster;
use skcc_awards::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "skcc-tracker",
    about = "Evaluate SKCC award progress over a CW contact log",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every supported award
    Awards,
    /// Print the endorsement ladder and requirements of one award
    Tiers(TiersArgs),
    /// Evaluate progress for one or more awards over a contact log
    Progress(ProgressArgs),
}

#[derive(Args, Debug)]
struct TiersArgs {
    /// Award name, e.g. "centurion" or "SKCC Rag Chew"
    award: String,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct ProgressArgs {
    /// CSV export of the contact log
    #[arg(long)]
    contacts: PathBuf,
    /// Award to evaluate; repeat for several (defaults to all)
    #[arg(long = "award")]
    awards: Vec<String>,
    /// Directory holding centurionlist.txt, tribunelist.txt and senator.txt
    #[arg(long)]
    roster_dir: Option<PathBuf>,
    /// Centurion achievement list
    #[arg(long)]
    centurion_list: Option<PathBuf>,
    /// Tribune achievement list
    #[arg(long)]
    tribune_list: Option<PathBuf>,
    /// Senator achievement list
    #[arg(long)]
    senator_list: Option<PathBuf>,
    /// Emit JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TiersView {
    award: AwardId,
    name: String,
    description: String,
    base_requirement: u64,
    units: String,
    rules: Vec<String>,
    tiers: Vec<EndorsementTier>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Awards => {
            list_awards();
            Ok(())
        }
        Command::Tiers(args) => show_tiers(args),
        Command::Progress(args) => run_progress(args, config),
    }
}

fn list_awards() {
    let registry = AwardRegistry::new();
    for award in registry.awards() {
        println!("{:<16} {}", award.slug(), award.label());
    }
}

fn show_tiers(args: TiersArgs) -> Result<(), AppError> {
    let rule = AwardRegistry::new().resolve(&args.award)?;
    let requirements = rule.requirements();
    let view = TiersView {
        award: rule.id(),
        name: requirements.name,
        description: requirements.description,
        base_requirement: requirements.base_requirement,
        units: requirements.units,
        rules: requirements.rules,
        tiers: rule.endorsement_tiers(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("{}", view.name);
    println!("{}", view.description);
    println!("Requires {} {}", view.base_requirement, view.units);
    for rule in &view.rules {
        println!("  - {rule}");
    }
    println!("\nEndorsements");
    for tier in &view.tiers {
        println!("  {:>9}  {}", tier.threshold, tier.label);
    }
    Ok(())
}

fn run_progress(args: ProgressArgs, config: AppConfig) -> Result<(), AppError> {
    let contacts = ContactLogImporter::from_path(&args.contacts)?;
    let registry = AwardRegistry::new();

    let awards = selected_awards(&registry, &args.awards)?;

    let mut ctx = AwardContext::new(config.operator.clone());
    match load_roster(&args, &config)? {
        Some(roster) => {
            info!(members = roster.len(), "membership roster loaded");
            ctx = ctx.with_roster(Arc::new(roster));
        }
        None => warn!("no roster configured; Tribune and Senator contacts cannot be confirmed"),
    }
    let ctx = with_derived_dates(ctx, &contacts)?;

    // One evaluation per award here; hits only occur for callers that keep the
    // cache across evaluations of the same snapshot.
    let cache = ProgressCache::new(config.cache.ttl());
    let mut reports = Vec::with_capacity(awards.len());
    for award in awards {
        let rule = registry.rule_for(award)?;
        let report = cache.get_or_compute(award, &contacts, &ctx.operator, Utc::now(), || {
            rule.calculate_progress(&contacts, &ctx)
        });
        reports.push(report);
    }
    info!(
        contacts = contacts.len(),
        awards = reports.len(),
        "progress evaluated"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        render_reports(&reports);
    }
    Ok(())
}

/// Named awards in request order without repeats; every award when none are named.
fn selected_awards(registry: &AwardRegistry, names: &[String]) -> Result<Vec<AwardId>, AppError> {
    if names.is_empty() {
        return Ok(registry.awards().to_vec());
    }
    let mut awards = Vec::with_capacity(names.len());
    for name in names {
        let award = registry.lookup(name)?;
        if !awards.contains(&award) {
            awards.push(award);
        }
    }
    Ok(awards)
}

/// Fill in operator achievement dates the configuration leaves out, from the
/// log itself. The Centurion date comes first since Tribune eligibility
/// depends on it.
fn with_derived_dates(
    mut ctx: AwardContext,
    contacts: &[ContactRecord],
) -> Result<AwardContext, AppError> {
    if ctx.operator.centurion_date.is_none() {
        let rule = CenturionRule::new().map_err(AwardError::from)?;
        ctx.operator.centurion_date = rule.achievement_date(contacts);
        if let Some(date) = ctx.operator.centurion_date {
            info!(%date, "operator Centurion date derived from the log");
        }
    }
    if ctx.operator.tribune_x8_date.is_none() {
        let rule = TribuneRule::new().map_err(AwardError::from)?;
        ctx.operator.tribune_x8_date = rule.x8_achievement_date(contacts, &ctx);
        if let Some(date) = ctx.operator.tribune_x8_date {
            info!(%date, "operator Tribune x8 date derived from the log");
        }
    }
    Ok(ctx)
}

fn load_roster(args: &ProgressArgs, config: &AppConfig) -> Result<Option<MemberRoster>, AppError> {
    let explicit = [
        (Designation::Centurion, &args.centurion_list),
        (Designation::Tribune, &args.tribune_list),
        (Designation::Senator, &args.senator_list),
    ];
    let dir = args.roster_dir.as_ref().or(config.roster.dir.as_ref());

    if dir.is_none() && explicit.iter().all(|(_, path)| path.is_none()) {
        return Ok(None);
    }

    let mut roster = match dir {
        Some(dir) => MemberRoster::from_dir(dir)?,
        None => MemberRoster::new(),
    };
    for (designation, path) in explicit {
        if let Some(path) = path {
            roster = roster.with_feed_path(designation, path)?;
        }
    }
    Ok(Some(roster))
}

fn render_reports(reports: &[ProgressReport]) {
    for report in reports {
        let mark = if report.achieved { "*" } else { " " };
        println!(
            "{mark} {:<28} {:>9}/{:<9} {:>5.1}%  {}",
            report.award.label(),
            report.current,
            report.required,
            report.percentage,
            report.endorsement
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use skcc_awards::awards::OperatorProfile;
    use skcc_awards::roster::MemberStanding;

    fn contact(member: &str) -> ContactRecord {
        ContactRecord {
            callsign: format!("K{member}"),
            qso_date: "20200101".to_string(),
            mode: "CW".to_string(),
            member_number: Some(member.to_string()),
            key_type: Some("STRAIGHT".to_string()),
            ..ContactRecord::default()
        }
    }

    #[test]
    fn parses_progress_arguments() {
        let cli = Cli::try_parse_from([
            "skcc-tracker",
            "progress",
            "--contacts",
            "log.csv",
            "--award",
            "centurion",
            "--award",
            "rag chew",
            "--tribune-list",
            "tribunelist.txt",
            "--json",
        ])
        .expect("arguments parse");

        match cli.command {
            Command::Progress(args) => {
                assert_eq!(args.contacts, PathBuf::from("log.csv"));
                assert_eq!(args.awards, vec!["centurion", "rag chew"]);
                assert_eq!(args.tribune_list, Some(PathBuf::from("tribunelist.txt")));
                assert!(args.centurion_list.is_none());
                assert!(args.json);
            }
            other => panic!("expected progress command, got {other:?}"),
        }
    }

    #[test]
    fn progress_requires_a_contact_log() {
        assert!(Cli::try_parse_from(["skcc-tracker", "progress"]).is_err());
    }

    #[test]
    fn award_selection_keeps_request_order_without_repeats() {
        let registry = AwardRegistry::new();
        let names = vec![
            "Rag Chew".to_string(),
            "centurion".to_string(),
            "rag_chew".to_string(),
        ];
        let awards = selected_awards(&registry, &names).expect("known awards");
        assert_eq!(awards, vec![AwardId::RagChew, AwardId::Centurion]);

        let all = selected_awards(&registry, &[]).expect("defaults");
        assert_eq!(all.len(), 13);

        let err = selected_awards(&registry, &["Marathon".to_string()]).expect_err("unknown");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn configured_dates_are_kept() {
        let centurion = NaiveDate::from_ymd_opt(2011, 5, 6);
        let tribune_x8 = NaiveDate::from_ymd_opt(2016, 2, 3);
        let operator = OperatorProfile {
            centurion_date: centurion,
            tribune_x8_date: tribune_x8,
            ..OperatorProfile::default()
        };
        let contacts: Vec<_> = (1..=120).map(|n| contact(&n.to_string())).collect();
        let ctx = with_derived_dates(AwardContext::new(operator), &contacts).expect("dates");
        assert_eq!(ctx.operator.centurion_date, centurion);
        assert_eq!(ctx.operator.tribune_x8_date, tribune_x8);
    }

    #[test]
    fn centurion_date_falls_back_to_the_log() {
        let contacts: Vec<_> = (1..=100).map(|n| contact(&n.to_string())).collect();
        let ctx = with_derived_dates(AwardContext::default(), &contacts).expect("dates");
        assert_eq!(ctx.operator.centurion_date, NaiveDate::from_ymd_opt(2020, 1, 1));

        let short: Vec<_> = (1..=99).map(|n| contact(&n.to_string())).collect();
        let ctx = with_derived_dates(AwardContext::default(), &short).expect("dates");
        assert!(ctx.operator.centurion_date.is_none());
    }

    #[test]
    fn tribune_x8_date_falls_back_to_the_log() {
        let mut roster = MemberRoster::new();
        for n in 1..=400 {
            roster.insert(MemberStanding {
                base: n.to_string(),
                centurion_date: NaiveDate::from_ymd_opt(2010, 1, 1),
                tribune_date: NaiveDate::from_ymd_opt(2010, 1, 1),
                highest: Some(Designation::Tribune),
                ..MemberStanding::default()
            });
        }
        let contacts: Vec<_> = (1..=400).map(|n| contact(&n.to_string())).collect();

        let ctx = AwardContext::default().with_roster(Arc::new(roster));
        let ctx = with_derived_dates(ctx, &contacts).expect("dates");
        assert_eq!(ctx.operator.centurion_date, NaiveDate::from_ymd_opt(2020, 1, 1));
        assert_eq!(ctx.operator.tribune_x8_date, NaiveDate::from_ymd_opt(2020, 1, 1));

        let senator = AwardRegistry::new()
            .bind("senator", ctx)
            .expect("senator binds")
            .calculate_progress(&contacts);
        assert_eq!(senator.current, 400);
        assert!(senator.achieved);

        let ctx = with_derived_dates(AwardContext::default(), &contacts).expect("dates");
        assert!(ctx.operator.tribune_x8_date.is_none());
    }
}
