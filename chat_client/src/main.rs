mod client;
mod history;

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::instrument;
use tracing_subscriber::EnvFilter;

use client::{failure_notice, HttpClient};
use history::{History, Who};

#[derive(Parser, Debug)]
#[clap(about = "Terminal client for the SimpleBot chat server")]
struct Args {
    #[clap(short, long, env = "SIMPLEBOT_SERVER", default_value = "127.0.0.1:5000")]
    server_address: String,
    /// JSON file to keep the conversation in between runs.
    #[clap(long)]
    history: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is the chat transcript.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let client = HttpClient::new(&args.server_address);
    tracing::info!("Chatting with {}", client.url());

    let mut history = History::load(args.history);
    run(
        BufReader::new(tokio::io::stdin()),
        &client,
        &mut history,
        &mut std::io::stdout(),
    )
    .await
}

/// Replays `history`, then answers every non-blank input line until EOF.
async fn run<R: AsyncBufRead + Unpin>(
    input: R,
    client: &HttpClient,
    history: &mut History,
    out: &mut impl Write,
) -> Result<()> {
    for entry in history.entries() {
        writeln!(out, "{}", entry.render())?;
    }

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        handle_line(client, history, &line, out).await?;
    }
    Ok(())
}

#[instrument(skip_all, fields(user_text, reply_text))]
async fn handle_line(
    client: &HttpClient,
    history: &mut History,
    line: &str,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let span = tracing::Span::current();
    span.record("user_text", line);
    history.push(Who::User, line);

    let reply = match client.send_message(line.trim()).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Error sending message: {:?}", e);
            failure_notice(&e).to_owned()
        }
    };
    span.record("reply_text", reply.as_str());

    writeln!(out, "{}", history.push(Who::Bot, &reply).render())?;
    if let Err(e) = history.save() {
        tracing::warn!("Error saving history: {:?}", e);
    }
    Ok(())
}
