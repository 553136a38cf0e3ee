//! Frameact - Cross-Context UI Action Execution Engine
//!
//! Main entry point for the CLI. Runs a script (from a file or the stub
//! prompt translator) against the built-in demo document, embedded same- or
//! cross-origin, and prints the per-step log and the run summary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use futures::StreamExt;
use url::Url;

use frameact::{
    embed, translate, ActionPerformer, Config, ContextBridge, DocumentListener, MemoryDocument,
    RunEvent, RunSummary, Script, Sequencer,
};

/// Frameact - Cross-Context UI Action Execution Engine
#[derive(Parser, Debug)]
#[command(name = "frameact")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Free-text instruction, translated via the stub rule table
    #[arg(long, short = 'p')]
    prompt: Option<String>,

    /// Path to a JSON script file (an array of actions)
    #[arg(long, short = 's')]
    script: Option<PathBuf>,

    /// URL of the page hosting the engine
    #[arg(long, default_value = "http://localhost:4000/")]
    host_url: String,

    /// URL of the embedded target document
    #[arg(long)]
    target_url: Option<String>,

    /// Embed the target document on the other side of an origin boundary
    #[arg(long)]
    cross_origin: bool,

    /// Print log entries as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Inter-step pacing override in milliseconds
    #[arg(long)]
    pace_ms: Option<u64>,

    /// Enable debug output
    #[arg(long, short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_target(false)
        .init();

    // Build configuration
    let mut config = Config::load();

    // Apply CLI overrides
    if let Some(pace_ms) = args.pace_ms {
        config.pacing.inter_step_ms = pace_ms;
    }

    let script = load_script(&args)?;

    let host_url = Url::parse(&args.host_url)?;
    let target_url = match &args.target_url {
        Some(url) => Url::parse(url)?,
        // The demo target shares the host origin unless asked otherwise
        None if args.cross_origin => Url::parse("http://localhost:4001/")?,
        None => host_url.clone(),
    };

    let document = MemoryDocument::login_page();
    let listener = Arc::new(DocumentListener::new(document.clone(), &config));
    let frame = embed(&host_url, &target_url, document, listener);

    let bridge = ContextBridge::new(frame, ActionPerformer::new(&config));
    let mut sequencer = Sequencer::new(bridge, &config);

    // Render progress while the run is in flight
    let mut events = sequencer.events();
    let progress = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            if let RunEvent::StepStarted {
                step,
                total,
                action,
                selector,
            } = event
            {
                println!("[{}/{}] {} {}", step, total, action, selector);
            }
        }
    });

    let report = sequencer.run(script).await;
    drop(sequencer);
    progress.await?;

    println!();
    for entry in &report.entries {
        if args.json {
            println!("{}", serde_json::to_string(entry)?);
        } else {
            let value = entry
                .value
                .as_deref()
                .map(|v| format!(" \"{}\"", v))
                .unwrap_or_default();
            println!(
                "step {}: {} {}{} -> {:?}",
                entry.step, entry.action, entry.selector, value, entry.outcome
            );
        }
    }

    println!("\n{}", RunSummary::from_report(&report));
    Ok(())
}

/// Pick the script source: an explicit file, a prompt for the translator,
/// or the translator's default script.
fn load_script(args: &Args) -> anyhow::Result<Script> {
    if let Some(path) = &args.script {
        let content = std::fs::read_to_string(path)?;
        return Ok(serde_json::from_str(&content)?);
    }

    Ok(translate(args.prompt.as_deref().unwrap_or_default()))
}
