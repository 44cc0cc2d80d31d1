mod commands;
mod domain;
mod logging;
mod services;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use crate::commands::base_commands::{CliArgs, Commands};
use crate::commands::sensitivity_cmd::sensitivity_command;
use crate::commands::simulate_cmd::simulate_command;
use crate::commands::template_cmd::template_command;
use crate::logging::init_logging;
use clap::{CommandFactory, Parser};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    match args.command {
        cmd @ Commands::Simulate { .. } => simulate_command(cmd),
        cmd @ Commands::Sensitivity { .. } => sensitivity_command(cmd),
        cmd @ Commands::Template { .. } => template_command(cmd),
        Commands::Completions { shell } => {
            let mut command = CliArgs::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
            ExitCode::SUCCESS
        }
    }
}
