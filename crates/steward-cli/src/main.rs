//! CLI entry point for Steward.
//!
//! This binary provides the `steward` command with subcommands for starting
//! the HTTP service, running a single request through the pipeline, and
//! listing the recognition rules.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use steward_agent::{AgentConfig, CompletionClient};
use steward_intent::{CompletionAnalyzer, Interpreter, RuleMatcher};
use steward_ops::Resolver;
use steward_web::{ServiceConfig, WebServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Steward -- a natural-language assistant for Unity Catalog.
#[derive(Parser)]
#[command(
    name = "steward",
    version,
    about = "Steward -- natural-language Unity Catalog assistant",
    long_about = "Turns plain-English catalog requests into Unity Catalog SQL. \
                  Pattern rules handle the common phrasings; anything else is \
                  escalated to the completion model when an API key is configured."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server.
    Serve {
        /// Address to bind the HTTP server to (overrides SERVER_HOST).
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on (overrides SERVER_PORT).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Run a single request through the pipeline and print the result.
    Ask {
        /// The request, e.g. "create a catalog named sales".
        text: String,

        /// Print the full pipeline output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the recognition rules in evaluation order.
    Rules,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, port } => cmd_serve(bind, port).await,
        Commands::Ask { text, json } => cmd_ask(&text, json).await,
        Commands::Rules => cmd_rules().await,
    }
}

// ---------------------------------------------------------------------------
// Subcommand: serve
// ---------------------------------------------------------------------------

async fn cmd_serve(bind: Option<String>, port: Option<u16>) -> Result<()> {
    init_tracing("info");

    info!("starting Steward");

    // 1. Load config from the environment, then apply CLI overrides.
    let mut config = ServiceConfig::from_env()
        .map_err(|e| anyhow!(e))
        .context("failed to load server configuration")?;
    if let Some(bind) = bind {
        config.host = bind;
    }
    if let Some(port) = port {
        config.port = port;
    }

    // 2. Build the recognition pipeline.
    let interpreter = build_interpreter()?;
    let resolver = Resolver::new();

    // 3. Serve until interrupted.
    WebServer::new(config, interpreter, resolver)
        .start()
        .await
        .map_err(|e| anyhow!(e))
}

// ---------------------------------------------------------------------------
// Subcommand: ask
// ---------------------------------------------------------------------------

async fn cmd_ask(text: &str, json: bool) -> Result<()> {
    init_tracing("warn");

    let interpreter = build_interpreter()?;
    let resolver = Resolver::new();

    let resolved = interpreter.interpret(text).await;
    let result = resolver.resolve(resolved.intent, &resolved.params);

    if json {
        let report = serde_json::json!({
            "request": resolved,
            "operation": result,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("  {}", result.message);
    if let Some(explanation) = &resolved.explanation {
        println!("  ({explanation})");
    }
    if let Some(sql) = &result.sql {
        println!();
        println!("  SQL:");
        println!("    {}", sql.replace('\n', "\n    "));
    }
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Subcommand: rules
// ---------------------------------------------------------------------------

async fn cmd_rules() -> Result<()> {
    init_tracing("warn");

    let matcher = RuleMatcher::with_default_rules()?;

    println!();
    println!("  Recognition rules ({}, first match wins):", matcher.len());
    println!();

    for rule in matcher.rules() {
        println!("  {:<17} {}", rule.intent.as_str(), rule.pattern);
        if !rule.slots().is_empty() {
            let slots: Vec<&str> = rule.slots().iter().map(|key| key.as_str()).collect();
            println!("  {:<17} captures: {}", "", slots.join(", "));
        }
    }
    println!();

    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the interpreter shared by every subcommand.
///
/// The completion tier is enabled only when `ANTHROPIC_API_KEY` is usable;
/// without it the matcher still covers every pattern-defined phrasing.
fn build_interpreter() -> Result<Interpreter> {
    let mut interpreter = Interpreter::new(RuleMatcher::with_default_rules()?);

    match AgentConfig::from_env().and_then(CompletionClient::new) {
        Ok(client) => {
            interpreter = interpreter.with_analyzer(Arc::new(CompletionAnalyzer::new(client)));
            info!("completion analyzer enabled");
        }
        Err(e) => {
            warn!(error = %e, "completion analyzer disabled, matching rules only");
        }
    }

    Ok(interpreter)
}

/// Initialize the tracing subscriber with the given default log level.
fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
