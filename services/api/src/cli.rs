use crate::demo::{run_demo, run_roster_generate, DemoArgs, GenerateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use duty_roster::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Club Duty Roster Service",
    about = "Generate and serve volunteer duty rosters from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with duty rosters directly
    Roster {
        #[command(subcommand)]
        command: RosterCommand,
    },
    /// Run an end-to-end roster demo against a built-in sample club
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum RosterCommand {
    /// Generate a month's duty roster and print it
    Generate(GenerateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Roster {
            command: RosterCommand::Generate(args),
        } => run_roster_generate(args),
        Command::Demo(args) => run_demo(args),
    }
}
