mod commands;
mod terminal;

use commands::{env, resolve, CommandLine, Commands};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    match commands.command {
        Commands::Resolve(args) => {
            print::header("network identity resolution", args.quiet);
            resolve::resolve(args).await
        }
        Commands::Env => {
            print::header("caller environment", 0);
            env::env()
        }
    }
}
