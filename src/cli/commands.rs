use crate::config::{ExtractConfig, SubmissionConfig};
use crate::core::{build_roster, Roster};
use crate::corrections::CorrectionSet;
use crate::error::RosterResult;
use crate::excel::WorkbookImporter;
use crate::submission::{
    assemble_and_submit, check_upload_paths, DepositClient, SubmissionRequest,
};
use crate::writer::{
    write_outputs, AuthorStrings, AFFILIATIONS_NEW_LINES_FILE, AFFILIATIONS_ONE_LINE_FILE,
    AUTHORS_NUMBERED_FILE, AUTHORS_PLAIN_FILE,
};
use colored::Colorize;
use std::path::Path;

/// Status line printed before each output file path
fn output_label(file_name: &str) -> &'static str {
    match file_name {
        AUTHORS_PLAIN_FILE => "Author string without affiliation numbers output to:",
        AUTHORS_NUMBERED_FILE => "Author string with affiliation numbers output to:",
        AFFILIATIONS_ONE_LINE_FILE => "Author affiliations on one line output to:",
        AFFILIATIONS_NEW_LINES_FILE => "Author affiliations on new lines output to:",
        _ => "Output written to:",
    }
}

/// Read the workbook, apply corrections and build the ordered roster
pub fn load_roster(config: &ExtractConfig, verbose: bool) -> RosterResult<Roster> {
    let importer = WorkbookImporter::new(&config.workbook_path)?;

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }
    let (master, ordering) = importer.import(&config.target_sheet)?;
    let mut directory = importer.master_directory(&master)?;
    let memberships = importer.memberships(&ordering)?;

    if verbose {
        println!("   {} authors in {}", directory.len(), master.name.bright_blue());
        println!(
            "   {} contributing rows in {}\n",
            memberships.len(),
            ordering.name.bright_blue()
        );
    }

    if config.builtin_corrections {
        CorrectionSet::builtin().apply(&mut directory)?;
    }
    if let Some(path) = &config.corrections_path {
        let applied = CorrectionSet::load(path)?.apply(&mut directory)?;
        if verbose {
            println!("   Applied {} corrections from {}", applied, path.display());
        }
    }

    build_roster(directory, memberships, &ordering.name)
}

/// Execute the extraction: build the roster and write the four author strings
pub fn extract(config: &ExtractConfig, verbose: bool) -> RosterResult<Roster> {
    println!("{}", "📝 Tara Authors - Author list extraction".bold().green());
    println!("   Workbook: {}", config.workbook_path.display());
    println!("   Sheet:    {}", config.target_sheet.bright_yellow().bold());
    println!("   Output:   {}\n", config.output_dir.display());

    config.validate()?;
    let roster = load_roster(config, verbose)?;

    let unaffiliated = roster.registry.unaffiliated_authors();
    if !unaffiliated.is_empty() {
        println!(
            "{}",
            format!("⚠️  {} authors have no affiliation:", unaffiliated.len()).yellow()
        );
        for key in unaffiliated {
            println!("      {}", key);
        }
        println!();
    }

    let strings = AuthorStrings::from_roster(&roster);
    let written = write_outputs(&config.output_dir, &strings)?;
    print_outputs(&written);

    println!(
        "\n{}",
        format!(
            "✅ {} authors, {} affiliations",
            roster.order.len(),
            roster.registry.len()
        )
        .bold()
        .green()
    );

    Ok(roster)
}

fn print_outputs(written: &[impl AsRef<Path>]) {
    for path in written {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("{}", output_label(&file_name).cyan());
        println!("\t{}", path.display());
    }
}

/// Execute the deposit for an extracted roster.
///
/// Returns the deposition's web page, or `None` on a dry run.
pub fn submit(roster: &Roster, config: &SubmissionConfig) -> RosterResult<Option<String>> {
    println!("\n{}", "📦 Tara Authors - Zenodo submission".bold().green());
    println!("   API:   {}", config.api_url);
    println!("   Title: {}", config.title.bright_yellow());
    println!("   Files: {}\n", config.data_files.len());

    let request = SubmissionRequest {
        title: config.title.clone(),
        description: config.description.clone(),
        references: config.references.clone(),
        creators: roster.creator_entries(),
        data_files: config.data_files.clone(),
    };

    if config.dry_run {
        check_upload_paths(&request.data_files)?;
        println!("{}", "📋 Meta information is:".cyan());
        println!("{}\n", serde_json::to_string_pretty(&request.metadata())?);
        println!("{}", "📋 Dry run complete - nothing was submitted".yellow());
        return Ok(None);
    }

    let client = DepositClient::new(&config.api_url, &config.access_token, config.timeout)?;
    let html_url = assemble_and_submit(&client, &request)?;

    println!("{}", "✅ Your submission has been successfully uploaded.".bold().green());
    println!("   It has not been published.");
    println!("   Review it at: {}", html_url.bright_blue());
    Ok(Some(html_url))
}

/// Message printed when the deposit step is not requested
pub fn skip_submission() {
    println!(
        "\n{}",
        "Skipping Zenodo submission.\nTo do the Zenodo submission pass --submission.".yellow()
    );
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
