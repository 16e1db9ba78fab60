mod commands;
mod terminal;

use std::process::ExitCode;

use assay_common::config::Config;
use commands::{CommandLine, Commands, check, detect, resolvers};
use terminal::{logging, print};

fn main() -> anyhow::Result<ExitCode> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose);

    let cfg = Config {
        no_dns: commands.no_dns,
        quiet: commands.quiet,
        resolv_conf: commands.resolv_conf,
    };

    match commands.command {
        Commands::Detect { identifiers } => {
            print::header("detecting asset types", cfg.quiet);
            detect::detect(identifiers, &cfg)
        }
        Commands::Check { identifier } => {
            print::header("running every classifier", cfg.quiet);
            check::check(&identifier, &cfg)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Resolvers => {
            print::header("resolver configuration", cfg.quiet);
            resolvers::resolvers(&cfg)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
