pub mod env;
pub mod resolve;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "identr")]
#[command(about = "Resolves the canonical network identity of hosts.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the network identity of one or more hosts
    #[command(alias = "r")]
    Resolve(ResolveArgs),
    /// Show the identity of the local machine
    #[command(alias = "e")]
    Env,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Host names, IP literals or instance descriptors ('srv1\prod,1433')
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Resolve from DNS alone, skipping reachability and remote identity
    #[arg(short, long)]
    pub turbo: bool,

    /// Turn degradation warnings into per-host failures
    #[arg(long)]
    pub strict: bool,

    /// Reduce output; once hides the chrome, twice keeps only the summary
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Username for the remote management session
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for the remote management session
    #[arg(short, long, requires = "username")]
    pub password: Option<String>,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
