// Final report rendering

use crate::args::OutputFormat;
use anyhow::Result;
use colored::Colorize;
use mobydick_core::application::distribution::FailedRepository;
use mobydick_core::application::DistributionReport;
use mobydick_validate::{ValidationReport, ValidationStatus};
use serde::Serialize;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct FailureRow {
    repository: String,
    error: String,
}

impl From<&FailedRepository> for FailureRow {
    fn from(failed: &FailedRepository) -> Self {
        Self {
            repository: failed.repository.clone(),
            error: failed.error.clone(),
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    success_count: usize,
    failure_count: usize,
    duration_ms: i64,
    #[serde(flatten)]
    report: &'a DistributionReport,
}

/// Print the report to stdout in the requested format
pub fn print_report(report: &DistributionReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render_json(report)?),
        OutputFormat::Table => println!("{}", render_table(report)),
    }
    Ok(())
}

fn render_json(report: &DistributionReport) -> Result<String> {
    let view = JsonReport {
        success_count: report.success_count(),
        failure_count: report.failure_count(),
        duration_ms: report.duration_ms(),
        report,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

fn render_table(report: &DistributionReport) -> String {
    let mut out = String::new();

    if report.dry_run {
        out.push_str(&format!(
            "{}\n",
            format!(
                "Dry run: {} repositories in {} would receive {}",
                report.success_count(),
                report.organisation,
                report.path
            )
            .cyan()
            .bold()
        ));
        for repository in &report.succeeded {
            out.push_str(&format!("  {} {}\n", "•".bold(), repository));
        }
        return out;
    }

    out.push_str(&format!(
        "{}\n",
        format!("✓ {} succeeded", report.success_count()).green().bold()
    ));
    if report.failure_count() == 0 {
        out.push_str(&format!("{}\n", "✗ 0 failed".bold()));
        return out;
    }

    out.push_str(&format!(
        "{}\n\n",
        format!("✗ {} failed", report.failure_count()).red().bold()
    ));
    let rows: Vec<FailureRow> = report.failed.iter().map(FailureRow::from).collect();
    out.push_str(&Table::new(rows).to_string());
    out.push('\n');
    out
}

/// Print the Dockerfile check to stdout in the requested format
pub fn print_validation(report: &ValidationReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", render_validation_json(report)?),
        OutputFormat::Table => print!("{}", render_validation_text(report)),
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonValidation<'a> {
    status: ValidationStatus,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

fn render_validation_json(report: &ValidationReport) -> Result<String> {
    let view = JsonValidation {
        status: report.status(),
        report,
    };
    Ok(serde_json::to_string_pretty(&view)?)
}

fn render_validation_text(report: &ValidationReport) -> String {
    match report.status() {
        ValidationStatus::Skip => format!("{} No Dockerfiles found.\n", "[PASS]".green().bold()),
        ValidationStatus::Pass => format!(
            "{} All Dockerfiles are using versioned images.\n",
            "[PASS]".green().bold()
        ),
        ValidationStatus::Fail => {
            let mut out = format!(
                "{} Found Dockerfiles not using versioned images.\n",
                "[FAIL]".red().bold()
            );
            for file in report.failing() {
                for image in &file.unversioned {
                    out.push_str(&format!("{}: {}\n", file.path.display(), image));
                }
            }
            out
        }
    }
}
