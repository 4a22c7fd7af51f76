use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use jdmatch_core::config_file::{self, ENDPOINT_ENV};
use jdmatch_core::{FormController, HttpMatcher, InputMode, Phase, ResultView, ResumeFile};

mod output;

use output::ColorMode;

/// Resume/JD matcher - score a resume against a job description
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a resume and a job description to the matching service
    Match {
        /// Resume file to upload (PDF)
        #[arg(long, conflicts_with = "resume_text_file")]
        resume: Option<PathBuf>,

        /// Send the contents of this file as pasted resume text
        #[arg(long)]
        resume_text_file: Option<PathBuf>,

        /// File containing the job description
        #[arg(long)]
        jd_file: PathBuf,

        /// Matching service URL (overrides JDMATCH_ENDPOINT and the config file)
        #[arg(long)]
        endpoint: Option<String>,

        /// Print the parsed result as JSON instead of the formatted report
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check that the matching service is reachable
    Ping {
        /// Matching service URL (overrides JDMATCH_ENDPOINT and the config file)
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Match {
            resume,
            resume_text_file,
            jd_file,
            endpoint,
            json,
            no_color,
        } => {
            let color = ColorMode(!no_color && !json && std::io::stdout().is_terminal());
            run_match(
                resume.as_deref(),
                resume_text_file.as_deref(),
                &jd_file,
                endpoint,
                json,
                color,
            )
            .await
        }
        Command::Ping { endpoint } => ping(endpoint).await,
    }
}

fn build_matcher(endpoint: Option<String>) -> anyhow::Result<HttpMatcher> {
    let config = config_file::load_config().resolve(endpoint, std::env::var(ENDPOINT_ENV).ok());
    Ok(HttpMatcher::from_config(&config)?)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display()))
}

async fn run_match(
    resume: Option<&Path>,
    resume_text_file: Option<&Path>,
    jd_file: &Path,
    endpoint: Option<String>,
    json: bool,
    color: ColorMode,
) -> anyhow::Result<()> {
    let matcher = build_matcher(endpoint)?;
    tracing::info!(endpoint = %matcher.endpoint(), "matching resume");

    let mut form = FormController::new();
    if let Some(path) = resume_text_file {
        form.set_input_mode(InputMode::Text);
        form.set_resume_text(read_text(path)?);
    } else if let Some(path) = resume {
        let file = ResumeFile::from_path(path)
            .map_err(|e| anyhow::anyhow!("could not read {}: {e}", path.display()))?;
        form.set_resume_file(Some(file));
    }
    form.set_job_description(read_text(jd_file)?);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(form.submit_label());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let phase = form.submit(&matcher).await;
    spinner.finish_and_clear();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match phase {
        Phase::Succeeded(result) => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
            } else {
                output::print_result(&mut out, &ResultView::new(result), color)?;
            }
            Ok(())
        }
        Phase::Failed(failure) => {
            output::print_error(&mut std::io::stderr(), failure.message(), color)?;
            anyhow::bail!("match failed")
        }
        Phase::Idle | Phase::Submitting => {
            anyhow::bail!("request did not complete")
        }
    }
}

async fn ping(endpoint: Option<String>) -> anyhow::Result<()> {
    let matcher = build_matcher(endpoint)?;
    match matcher.ping().await {
        Ok(message) => {
            println!("{}: {}", matcher.endpoint(), message);
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "health check failed");
            anyhow::bail!("{} is not reachable: {e}", matcher.endpoint())
        }
    }
}
