use anyhow::Context;
use clap::Parser;
use overpass_worker::engine::executor::QueryExecutor;
use overpass_worker::engine::worker::QueryWorker;
use overpass_worker::logging;
use overpass_worker::shared::config::{CONFIG, Settings, load_settings_from};
use overpass_worker::shared::protocol::{ProtocolMessage, QueryRequest};
use std::io::{self, Read, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "overpass-cli")]
#[command(about = "Run one Overpass QL query and print the message stream", long_about = None)]
struct Args {
    /// Query text. Reads stdin when neither --query nor --file is given.
    #[arg(short, long, conflicts_with = "file")]
    query: Option<String>,

    /// File holding the query text
    #[arg(short, long)]
    file: Option<String>,

    /// Settings file, without extension
    #[arg(short, long)]
    config: Option<String>,

    /// Overpass interpreter URL, overrides the settings file
    #[arg(long)]
    endpoint: Option<String>,

    /// Print progress plus a short summary instead of the full payload
    #[arg(long)]
    summary: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let mut settings: Settings = match &args.config {
        Some(path) => load_settings_from(path)?,
        None => CONFIG.as_ref().clone(),
    };
    if let Some(endpoint) = args.endpoint.clone() {
        settings.overpass.endpoint = endpoint;
    }
    logging::init(&settings.logging)?;

    let query = read_query(&args)?;
    info!(endpoint = %settings.overpass.endpoint, "Submitting query");

    let executor = QueryExecutor::from_config(&settings.overpass)?;
    let mut stream = QueryWorker::new(Arc::new(executor)).execute(QueryRequest::new(query));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut succeeded = false;
    while let Some(message) = stream.recv().await {
        succeeded = matches!(message, ProtocolMessage::Success(_));
        if args.summary {
            writeln!(out, "{}", summarize(&message))?;
        } else {
            writeln!(out, "{}", message.to_json_line()?)?;
        }
    }
    out.flush()?;

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn read_query(args: &Args) -> anyhow::Result<String> {
    if let Some(query) = &args.query {
        return Ok(query.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path).with_context(|| format!("reading query from {path}"));
    }
    let mut query = String::new();
    io::stdin()
        .read_to_string(&mut query)
        .context("reading query from stdin")?;
    Ok(query)
}

fn summarize(message: &ProtocolMessage) -> String {
    match message {
        ProtocolMessage::Progress(text) => format!("... {text}"),
        ProtocolMessage::Success(payload) => format!(
            "ok: {} features, bbox {:?}",
            payload.feature_collection.features.len(),
            payload.bounding_box.to_array()
        ),
        ProtocolMessage::Failure(reason) => format!("failed: {reason}"),
    }
}
