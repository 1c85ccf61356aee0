//! Terminal front end for TruthScan.
//!
//! Usage:
//!   truthscan --text "Breaking news..."
//!   truthscan --url https://example.com/story
//!   truthscan --text-file article.txt --json     # one JSON line per transition

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use truthscan::{
    HttpVerificationClient, Presentation, RequestOrchestrator, VerificationInput, VerifierConfig,
    ViewState,
};

#[derive(Parser)]
#[command(name = "truthscan")]
#[command(about = "Check a news article or URL against the TruthScan verification service")]
struct Args {
    /// Article text to verify
    #[arg(short = 't', long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read article text from a file
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Article URL to verify
    #[arg(short = 'u', long)]
    url: Option<String>,

    /// Config file (defaults to ./truthscan.{yaml,toml,json} if present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Print view transitions as JSON lines
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let cfg = VerifierConfig::load(args.config.as_deref()).context("loading configuration")?;
    init_tracing(&cfg);

    let text = match (&args.text, &args.text_file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(path)) => Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?,
        ),
        (None, None) => None,
    };
    let input = VerificationInput {
        text,
        url: args.url,
    };

    let service = Arc::new(HttpVerificationClient::new(&cfg.client)?);
    let orchestrator = RequestOrchestrator::with_intake_config(service, cfg.intake.clone());

    let json = args.json;
    orchestrator.subscribe(Arc::new(move |state: &ViewState| render(state, json)));

    let state = orchestrator.submit(input).await?;
    Ok(matches!(state, ViewState::Success { .. }))
}

fn init_tracing(cfg: &VerifierConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cfg.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn render(state: &ViewState, json: bool) {
    if json {
        match serde_json::to_string(state) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("error: cannot encode view state: {err}"),
        }
        return;
    }

    match state {
        ViewState::Idle => {}
        ViewState::Validating => println!("Validating input..."),
        ViewState::Submitting => println!("Submitting..."),
        ViewState::Awaiting => println!("Analyzing..."),
        ViewState::Success { presentation, .. } => print_presentation(presentation),
        ViewState::Failed { message, .. } => eprintln!("{message}"),
    }
}

fn print_presentation(p: &Presentation) {
    println!();
    println!("{}", p.headline);
    println!(
        "  verdict:    {} ({} confidence, {}%)",
        p.verdict,
        p.bucket.as_str(),
        p.confidence_percent
    );
    println!("  analysis:   {}", p.message);
    for note in &p.notes {
        let mark = if note.concern { "!" } else { "+" };
        println!("  [{mark}] {}", note.summary);
    }
}
