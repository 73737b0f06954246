//! CLI for rfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rfetch_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_get, run_inspect, run_show};

/// Top-level CLI for rfetch.
#[derive(Debug, Parser)]
#[command(name = "rfetch")]
#[command(about = "rfetch: fetch http, https, file and data resources", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a resource and print its text with markup stripped.
    Show {
        /// Resource identifier; prefix with `view-source:` to print the raw body.
        /// Defaults to `default_url` from the config file.
        url: Option<String>,
    },

    /// Fetch a resource and print (or save) its raw body.
    Get {
        /// Resource identifier (http, https, file or data).
        url: String,

        /// Print the status line and headers before the body.
        #[arg(short, long)]
        include: bool,

        /// Write the body to this file instead of stdout.
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Parse a resource identifier and print its parts without fetching.
    Inspect {
        /// Resource identifier to parse.
        url: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Compute SHA-256 of a fetched body.
    Checksum {
        /// Resource identifier to fetch.
        url: String,

        /// Fail unless the digest equals this hex value.
        #[arg(long, value_name = "HEX")]
        expect: Option<String>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Show { url } => run_show(&cfg, url.as_deref())?,
            CliCommand::Get {
                url,
                include,
                output,
            } => run_get(&cfg, &url, include, output.as_deref())?,
            CliCommand::Inspect { url, json } => run_inspect(&url, json)?,
            CliCommand::Checksum { url, expect } => run_checksum(&cfg, &url, expect.as_deref())?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
