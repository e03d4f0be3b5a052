mod cli;


use crate::cli::{Command, CLI};
use anyhow::Context;
use clap::Parser;
use eos_trace_client::{decode_transfer, is_not_found, TraceApiClient};
use eos_trace_codec::ActionRegistry;
use eos_trace_data::BlockResp;
use eos_trace_primitives::{Block, BlockNumber, Checksum256, Name};
use serde::Serialize;
use std::io::Write;
use tracing::{info, warn};


fn main() -> anyhow::Result<()> {
    let args = CLI::parse();

    init_tracing();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(args))
}


fn init_tracing() {
    use std::io::IsTerminal;

    let env_filter = tracing_subscriber::EnvFilter::builder().parse_lossy(
        std::env::var(tracing_subscriber::EnvFilter::DEFAULT_ENV)
            .unwrap_or("info".to_string()),
    );

    // stdout carries the JSON output
    if std::io::stderr().is_terminal() {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .compact()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(false)
            .init();
    }
}


async fn run(args: CLI) -> anyhow::Result<()> {
    match &args.command {
        Command::Block { number, decode } => {
            let client = args.build_client()?;
            let Some(block) = fetch_block(&client, *number).await? else {
                return Ok(())
            };
            if *decode {
                print_decoded_actions(&block)
            } else {
                print_json(&block)
            }
        },
        Command::Transaction { id } => {
            let client = args.build_client()?;
            fetch_transaction(&client, id).await
        },
        Command::Transfer { hex } => {
            let transfer = decode_transfer(hex)?;
            print_json(&transfer)
        }
    }
}


async fn fetch_block(client: &TraceApiClient, number: BlockNumber) -> anyhow::Result<Option<BlockResp>> {
    match client.get_block_by_num(number).await {
        Ok(block) => {
            info!(
                block = %block.block_ref(),
                parent = %block.parent_ref(),
                transactions = block.transactions().len(),
                "fetched block"
            );
            Ok(Some(block))
        },
        Err(err) if is_not_found(&err) => {
            warn!(number, "block does not exist");
            Ok(None)
        },
        Err(err) => Err(err.context(format!("failed to fetch block {}", number)))
    }
}


async fn fetch_transaction(client: &TraceApiClient, id: &Checksum256) -> anyhow::Result<()> {
    match client.get_transaction_trace(id).await {
        Ok(trace) => {
            info!(block_num = trace.block_num, "fetched transaction");
            print_json(&trace)
        },
        Err(err) if is_not_found(&err) => {
            warn!(id = %id, "transaction does not exist");
            Ok(())
        },
        Err(err) => Err(err.context(format!("failed to fetch transaction {}", id)))
    }
}


#[derive(Serialize)]
struct DecodedAction {
    global_sequence: Option<u64>,
    account: Name,
    action: Name,
    receiver: Name,
    payload: Option<serde_json::Value>
}


fn print_decoded_actions(block: &BlockResp) -> anyhow::Result<()> {
    let registry = ActionRegistry::default();
    let mut out = std::io::stdout().lock();
    for action in block.actions() {
        let payload = match action.decode_data(&registry) {
            Ok(payload) => payload.map(|p| p.to_json()).transpose()?,
            Err(err) => {
                warn!(
                    account = %action.account,
                    action = %action.name,
                    error = ?err,
                    "failed to decode action payload"
                );
                None
            }
        };
        let line = DecodedAction {
            global_sequence: action.global_sequence,
            account: action.account,
            action: action.name,
            receiver: action.receiver,
            payload
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }
    Ok(())
}


fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value).context("failed to write output")?;
    writeln!(out)?;
    Ok(())
}
