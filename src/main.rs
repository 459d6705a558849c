use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tara_authors::cli;
use tara_authors::config::{ExtractConfig, SubmissionArgs, SubmissionConfig};
use tara_authors::submission::DEFAULT_API_URL;

#[derive(Parser)]
#[command(name = "tara-authors")]
#[command(about = "Ordered author and affiliation lists from the Tara Pacific authors workbook")]
#[command(long_about = "Tara Authors - author and affiliation lists for Tara Pacific publications

Reads the 'Template' sheet (names, affiliations, ORCIDs) and the ordering sheet
named by --target-sheet-name, then writes four files to --output-dir-path:

  author_string_w_o_affiliation_numbers.txt   Smith, J.; Doe, A.
  author_string_w_affiliation_numbers.txt     Smith, J.¹; Doe, A.²˒¹
  affiliations_one_line.txt                   1-Lab1; 2-Lab2
  affiliations_new_lines.txt                  1-Lab1;\\n2-Lab2

ORDERING:
  First author(s), Contributing authors list #1, Contributing authors list #2,
  Consortium Coordinators, Scientific Directors, Contributing authors list #3.
  Scientific Directors and list #3 members are only placed in their own pass.

ZENODO SUBMISSION (--submission):
  Creates a draft deposition, uploads --data-file-paths and attaches the metadata.
  Nothing is published: review the draft at the printed URL.
    upload_type: dataset
    access_right: restricted
    license: CC-BY-4.0
    communities: tarapacific
    version: 1
    language: eng

EXAMPLES:
  tara-authors --excel-path authors.xlsx --target-sheet-name Paper --output-dir-path out
  tara-authors --excel-path authors.xlsx --target-sheet-name Paper --output-dir-path out \\
      --submission --access-token-path token.txt --meta-title \"Coral data\" \\
      --meta-description description.txt --data-file-paths a.csv,b.csv --dry-run")]
#[command(version)]
struct Cli {
    /// Path to the authors-lists workbook (.xlsx, .xls or .ods)
    #[arg(long)]
    excel_path: PathBuf,

    /// Sheet holding the category weights for this publication
    #[arg(long)]
    target_sheet_name: String,

    /// Existing directory the four output files are written to
    #[arg(long)]
    output_dir_path: PathBuf,

    /// YAML file of extra corrections applied after the built-in ones
    #[arg(long)]
    corrections: Option<PathBuf>,

    /// Do not apply the built-in corrections
    #[arg(long)]
    skip_builtin_corrections: bool,

    /// Create a draft Zenodo deposition after extraction
    #[arg(long)]
    submission: bool,

    /// File whose first line is the Zenodo access token
    #[arg(long, env = "ZENODO_ACCESS_TOKEN_PATH")]
    access_token_path: Option<PathBuf>,

    /// Comma-separated paths of the files to upload
    #[arg(long)]
    data_file_paths: Option<String>,

    /// Title of the submission
    #[arg(long)]
    meta_title: Option<String>,

    /// Description text, or the path of a plain text file holding it
    #[arg(long)]
    meta_description: Option<String>,

    /// File with one reference per line
    #[arg(long)]
    references: Option<PathBuf>,

    /// Base URL of the deposit API
    #[arg(long, env = "ZENODO_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Connect and request timeout in seconds (uploads also get time per byte)
    #[arg(long, default_value = "60")]
    timeout_secs: u64,

    /// Print the metadata instead of contacting the API
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn extract_config(&self) -> ExtractConfig {
        ExtractConfig {
            workbook_path: self.excel_path.clone(),
            target_sheet: self.target_sheet_name.clone(),
            output_dir: self.output_dir_path.clone(),
            corrections_path: self.corrections.clone(),
            builtin_corrections: !self.skip_builtin_corrections,
        }
    }

    fn submission_args(&self) -> SubmissionArgs {
        SubmissionArgs {
            access_token_path: self.access_token_path.clone(),
            data_file_paths: self.data_file_paths.clone(),
            title: self.meta_title.clone(),
            description: self.meta_description.clone(),
            references_path: self.references.clone(),
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            dry_run: self.dry_run,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "tara_authors=debug"
    } else {
        "tara_authors=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Resolved up front so a bad submission setup fails before any output is written
    let submission = if cli.submission {
        Some(
            SubmissionConfig::resolve(cli.submission_args())
                .context("Invalid submission settings")?,
        )
    } else {
        None
    };

    let extract_config = cli.extract_config();
    let roster = cli::extract(&extract_config, cli.verbose).with_context(|| {
        format!(
            "Failed to extract authors from {}",
            extract_config.workbook_path.display()
        )
    })?;

    match submission {
        Some(config) => {
            cli::submit(&roster, &config).context("Zenodo submission failed")?;
        }
        None => cli::skip_submission(),
    }

    Ok(())
}
