use super::ConsoleNotifier;
use crate::app::{self, ImportOutcome};
use crate::config::ReviewConfig;
use crate::error::{ReviewError, ReviewResult};
use crate::parser;
use crate::project::Project;
use crate::review::{FileSelection, MetadataVerdict};
use crate::writer;
use colored::Colorize;
use std::path::PathBuf;

/// Execute the export command
pub fn export(
    project_file: PathBuf,
    output: Option<PathBuf>,
    selected: Vec<String>,
    config: &ReviewConfig,
    verbose: bool,
) -> ReviewResult<()> {
    println!("{}", "📤 segment-review - Export".bold().green());
    println!("   Project: {}", project_file.display());

    if verbose {
        println!("{}", "📖 Loading project...".cyan());
    }
    let project = parser::parse_project(&project_file)?;

    let output = output.unwrap_or_else(|| {
        project_file
            .with_file_name(app::default_artifact_name(project.properties()))
    });
    println!("   Output:  {}\n", output.display());

    if verbose {
        println!(
            "   Found {} files, {} segments\n",
            project.files().len(),
            project.segment_count()
        );
    }

    let selection = FileSelection::from_paths(selected);
    let mut notifier = ConsoleNotifier::new(false);
    if !app::export_review(&project, &selection, &output, config, &mut notifier) {
        return Err(ReviewError::Export(format!(
            "No review workbook written to {}",
            output.display()
        )));
    }

    Ok(())
}

/// Execute the import command
pub fn import(
    project_file: PathBuf,
    input: PathBuf,
    config: &ReviewConfig,
    assume_yes: bool,
    dry_run: bool,
    json: bool,
    verbose: bool,
) -> ReviewResult<()> {
    if !json {
        println!("{}", "📥 segment-review - Import".bold().green());
        println!("   Project: {}", project_file.display());
        println!("   Input:   {}\n", input.display());
    }

    if dry_run && !json {
        println!(
            "{}",
            "📋 DRY RUN MODE - No changes will be written\n".yellow()
        );
    }

    let mut project = parser::parse_project(&project_file)?;
    let mut notifier = ConsoleNotifier::new(assume_yes).stderr_only(json);

    let report = match app::import_review(&mut project, &input, config, &mut notifier) {
        ImportOutcome::Completed(report) => report,
        ImportOutcome::Declined => return Ok(()),
        ImportOutcome::Failed => {
            return Err(ReviewError::Import(format!(
                "Could not import {}",
                input.display()
            )))
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if verbose {
        println!("   Changed segments: {:?}", report.changed);
        println!(
            "   Skipped: {} unknown, {} stale, {} invalid\n",
            report.skipped_unknown, report.skipped_stale, report.skipped_invalid
        );
    }

    if !report.has_changes() || dry_run {
        return Ok(());
    }

    writer::write_project(&project_file, &project)?;
    if !json {
        println!("   💾 Project updated: {}", project_file.display());
    }

    Ok(())
}

/// Execute the check command
pub fn check(project_file: PathBuf, input: PathBuf, config: &ReviewConfig) -> ReviewResult<()> {
    println!("{}", "🔍 segment-review - Check".bold().green());
    println!("   Project: {}", project_file.display());
    println!("   Input:   {}\n", input.display());

    let project = parser::parse_project(&project_file)?;
    let verdict = app::check_review(&project, &input)?;

    if verdict.is_match() {
        println!("{}", "✅ Review workbook matches the project".bold().green());
        return Ok(());
    }

    let reason = match &verdict {
        MetadataVerdict::Mismatch(m) => format!("{} mismatched fields", m.len()),
        _ => "missing metadata".to_string(),
    };

    if let Some(warning) = verdict.warning(&config.messages) {
        println!("{}", warning.yellow());
    }
    Err(ReviewError::Validation(format!(
        "Review workbook does not match the project: {}",
        reason
    )))
}

/// Execute the files command
pub fn files(project_file: PathBuf) -> ReviewResult<()> {
    let project = parser::parse_project(&project_file)?;
    let props = project.properties();

    println!("{}", "📂 segment-review - Source files".bold().green());
    println!(
        "   Project: {} ({} → {})\n",
        props.name.bright_blue().bold(),
        props.source_language,
        props.target_language
    );

    for file in project.files() {
        println!("   {} ({} segments)", file.path.cyan(), file.len());
    }
    println!("\n   {} files, {} segments", project.files().len(), project.segment_count());

    Ok(())
}
