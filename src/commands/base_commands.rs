use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Yaml,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Monte Carlo viability simulation for a scenario
    Simulate {
        /// Scenario YAML file
        #[arg(short, long)]
        input: String,
        /// Output result file
        #[arg(short, long)]
        output: String,
        /// Override the scenario's iteration count
        #[arg(short = 'n', long)]
        iterations: Option<usize>,
        /// Override the scenario's horizon in months
        #[arg(short, long)]
        months: Option<u32>,
        /// Seed for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,
        /// Result file format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
        format: OutputFormat,
        /// Skip writing the PNG charts
        #[arg(long)]
        no_plots: bool,
    },
    /// Rank input variables by their estimated weekly impact
    Sensitivity {
        /// Scenario YAML file
        #[arg(short, long)]
        input: String,
    },
    /// Write a sample scenario YAML file
    Template {
        /// Output YAML file
        #[arg(short, long)]
        output: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
