use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use multiversion_core::{Dispatcher, DispatcherConfig, NormalizerKind, Version, VersionScheme};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Pick a witty comment by comparing a version against registered conditions.
#[derive(Debug, Parser)]
#[command(name = "multiversion", version, about)]
struct Cli {
    /// Version used as the selection value.
    #[arg(short, long, default_value = env!("CARGO_PKG_VERSION"))]
    target: String,

    /// JSON dispatcher config (name, doc, normalizer).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print which condition was selected.
    #[arg(long)]
    explain: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

type Witty = Dispatcher<(), String, (), &'static str, Version>;

fn load_config(path: Option<&PathBuf>) -> Result<DispatcherConfig> {
    let Some(path) = path else {
        let mut config = DispatcherConfig::new("witty_comment");
        config.doc = Some("A comment suited to the running version.".to_string());
        config.normalizer = NormalizerKind::Version(VersionScheme::Loose);
        return Ok(config);
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    DispatcherConfig::from_json(&text).with_context(|| format!("in {}", path.display()))
}

/// 事前に登録した条件で witty comment を組み立てる
fn witty_comment(config: &DispatcherConfig, target: String) -> Witty {
    let mut witty = config
        .builder::<String>()
        .function(move || target.clone(), |_, ()| "'Tis but a flesh wound!");
    witty
        .condition_inrange("3.8.2".into(), "3.8.6".into(), |_, ()| "38x: Don't panic!")
        .condition_gt("3.7.0".into(), |_, ()| "gt37: Here we go again!");
    witty
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;
    info!(name = %config.name, target = %cli.target, "dispatching");

    let witty = witty_comment(&config, cli.target.clone());
    debug!(doc = ?witty.doc(), "resolved signature");

    let (explanation, comment) = run(&witty, cli.explain);
    if let Some(explanation) = explanation {
        println!("{explanation}");
    }
    println!("{comment}");
    Ok(())
}

/// Resolve the selection value once; the explanation and the comment both
/// come from that value.
fn run(witty: &Witty, explain: bool) -> (Option<String>, &'static str) {
    let value = witty.resolve(&());
    let explanation = explain.then(|| match witty.position(&value) {
        Some(index) => {
            let kind = witty.conditions()[index].kind();
            format!("{}: condition #{index} ({kind}) matched {value}", witty.name())
        }
        None => format!("{}: no condition matched {value}, using default", witty.name()),
    });
    let comment = (witty.select(&value))(&(), ());
    (explanation, comment)
}
