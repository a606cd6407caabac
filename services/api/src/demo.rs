use clap::Args;
use pathfinder::config::AppConfig;
use pathfinder::eligibility::intake::{FormValue, IeltsSubmission};
use pathfinder::eligibility::{AssessmentReport, EligibilityService, ProfileSubmission};
use pathfinder::error::AppError;

use crate::cli::{EvaluateArgs, ProgramsArgs};
use crate::infra::{load_service, read_submission};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the programs each sample profile misses, with reasons
    #[arg(long)]
    pub(crate) show_rejected: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        profile,
        catalog_dir,
        show_rejected,
    } = args;

    let config = AppConfig::load()?;
    let service = load_service(&config.data, catalog_dir)?;
    let submission = read_submission(&profile)?;
    let report = evaluate(&service, submission)?;

    println!("Eligibility report for {}", profile.display());
    render_report(&report, show_rejected);
    Ok(())
}

pub(crate) fn run_programs(args: ProgramsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let service = load_service(&config.data, None)?;

    for version in service.catalog().versions() {
        println!(
            "{} data set {} ({} programs)",
            version.jurisdiction, version.version, version.programs
        );
    }

    let programs = service.programs(args.country.as_deref());
    if programs.is_empty() {
        println!("No programs match.");
        return Ok(());
    }

    println!("\nPrograms ({})", programs.len());
    for program in programs {
        let scoring = match &program.selection_factors {
            Some(factors) if program.is_points_based => {
                format!(" | points-based, minimum {}", factors.min_points)
            }
            _ => String::new(),
        };
        println!(
            "- {} [{}] {} ({}){}",
            program.id, program.country, program.name, program.category, scoring
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = load_service(&Default::default(), None)?;

    println!("Eligibility engine demo (bundled catalog)");
    for (label, submission) in sample_submissions() {
        println!("\n== {label} ==");
        let report = evaluate(&service, submission)?;
        render_report(&report, args.show_rejected);
    }

    Ok(())
}

fn evaluate(
    service: &EligibilityService,
    submission: ProfileSubmission,
) -> Result<AssessmentReport, AppError> {
    Ok(service.evaluate(submission)?)
}

pub(crate) fn render_report(report: &AssessmentReport, show_rejected: bool) {
    println!(
        "Language levels: {} overall (L {} / S {} / R {} / W {}) | CEFR {}",
        report.language.clb.overall,
        report.language.clb.listening,
        report.language.clb.speaking,
        report.language.clb.reading,
        report.language.clb.writing,
        report.language.cefr
    );

    if report.is_empty() {
        println!("No eligible programs.");
    } else {
        println!("Eligible programs ({}):", report.results.len());
        for result in &report.results {
            let points = result
                .points
                .map(|points| format!(" | {points} points"))
                .unwrap_or_default();
            println!(
                "  - {} [{}]{}",
                result.program.name, result.program.country, points
            );
            println!("    notes: {}", result.notes_summary());
        }
    }

    if show_rejected && !report.rejected.is_empty() {
        println!("Not eligible ({}):", report.rejected.len());
        for rejected in &report.rejected {
            println!("  - {} [{}]", rejected.name, rejected.country);
            for note in &rejected.notes {
                println!("    * {note}");
            }
        }
    }

    for skipped in &report.skipped {
        println!("  ! skipped {}: {}", skipped.program_id, skipped.reason);
    }

    if !report.not_considered.is_empty() {
        println!(
            "Outside declared interests: {}",
            report.not_considered.join(", ")
        );
    }
}

fn ielts(listening: f64, speaking: f64, reading: f64, writing: f64) -> IeltsSubmission {
    IeltsSubmission {
        listening: Some(FormValue::from(listening)),
        speaking: Some(FormValue::from(speaking)),
        reading: Some(FormValue::from(reading)),
        writing: Some(FormValue::from(writing)),
    }
}

fn sample_submissions() -> Vec<(&'static str, ProfileSubmission)> {
    vec![
        (
            "Software engineer seeking a UK skilled worker route",
            ProfileSubmission {
                age: Some("30".into()),
                education: Some("bachelorsThreeYear".to_string()),
                work_experience: Some("2".into()),
                is_paid_work: Some("Yes".into()),
                work_location: vec!["China".to_string()],
                annual_salary: Some("40000".into()),
                salary_currency: Some("GBP".to_string()),
                ielts: ielts(7.0, 6.5, 6.5, 6.0),
                ..ProfileSubmission::default()
            },
        ),
        (
            "Experienced analyst aiming for Express Entry",
            ProfileSubmission {
                age: Some("30".into()),
                education: Some("twoBachelors".to_string()),
                work_experience: Some("4".into()),
                is_paid_work: Some("Yes".into()),
                work_location: vec!["India".to_string()],
                ielts: ielts(7.5, 6.5, 6.5, 6.5),
                ..ProfileSubmission::default()
            },
        ),
        (
            "Investor with a modest budget",
            ProfileSubmission {
                age: Some("48".into()),
                education: Some("masters".to_string()),
                investments: Some("Yes".into()),
                investment_budget: Some("100000".into()),
                investment_currency: Some("USD".to_string()),
                net_worth: Some("1500000".into()),
                net_worth_currency: Some("USD".to_string()),
                ..ProfileSubmission::default()
            },
        ),
    ]
}
