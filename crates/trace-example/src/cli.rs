use anyhow::anyhow;
use clap::{Parser, Subcommand};
use eos_trace_client::{ClientSettings, TraceApiClient};
use eos_trace_primitives::{BlockNumber, Checksum256};
use std::time::Duration;


#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct CLI {
    /// Base url of the node
    #[arg(long, default_value = "http://127.0.0.1:8888")]
    pub url: String,

    /// Header to add to every request
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    #[arg(long, value_name = "SECS")]
    pub request_timeout: Option<u64>,

    /// Reuse connections between requests
    #[arg(long)]
    pub keep_alive: bool,

    #[command(subcommand)]
    pub command: Command
}


#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch a block with its transactions and actions
    Block {
        number: BlockNumber,

        /// Print actions with their decoded payloads instead of the raw block
        #[arg(long)]
        decode: bool
    },
    /// Fetch a single transaction trace
    Transaction {
        id: Checksum256
    },
    /// Decode a hex encoded eosio.token transfer payload
    Transfer {
        hex: String
    }
}


impl CLI {
    pub fn client_settings(&self) -> anyhow::Result<ClientSettings> {
        let mut settings = ClientSettings::default().with_keep_alive(self.keep_alive);

        if let Some(secs) = self.request_timeout {
            settings = settings.with_request_timeout(Duration::from_secs(secs));
        }

        for header in self.headers.iter() {
            let (name, value) = header.split_once(':').ok_or_else(|| {
                anyhow!("invalid header `{}`, expected NAME:VALUE", header)
            })?;
            settings = settings.with_header(name.trim(), value.trim())?;
        }

        Ok(settings)
    }

    pub fn build_client(&self) -> anyhow::Result<TraceApiClient> {
        self.client_settings()?.build(&self.url)
    }
}
