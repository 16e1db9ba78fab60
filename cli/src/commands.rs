pub mod check;
pub mod detect;
pub mod resolvers;

use std::path::PathBuf;

use assay_common::config::DEFAULT_RESOLV_CONF;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "assay")]
#[command(about = "Tells what kind of asset an identifier is.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Never query DNS; hostnames are judged by shape and domains are skipped
    #[arg(long, global = true)]
    pub no_dns: bool,

    /// Resolver configuration used for SOA lookups
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_RESOLV_CONF)]
    pub resolv_conf: PathBuf,

    /// Less output: once drops headers, twice prints only the results
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the asset types of identifiers (read from stdin when none are given)
    #[command(alias = "d")]
    Detect { identifiers: Vec<String> },
    /// Show the verdict of every classifier for one identifier
    #[command(alias = "c")]
    Check { identifier: String },
    /// Show the DNS resolver configuration in use
    #[command(alias = "r")]
    Resolvers,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
