use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pathfinder::error::AppError;

use crate::demo::{run_demo, run_evaluate, run_programs, DemoArgs};
use crate::server;

#[derive(Parser, Debug)]
#[command(
    name = "Pathfinder",
    about = "Match migrant profiles against immigration program catalogs",
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
    /// Evaluate a profile submission stored as JSON
    Evaluate(EvaluateArgs),
    /// List catalog programs, optionally for one jurisdiction
    Programs(ProgramsArgs),
    /// Evaluate a handful of sample profiles against the bundled catalog
    Demo(DemoArgs),
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

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Path to a questionnaire submission (JSON)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Directory of jurisdiction data sets replacing the configured catalog
    #[arg(long)]
    pub(crate) catalog_dir: Option<PathBuf>,
    /// Also print programs the profile does not qualify for, with reasons
    #[arg(long)]
    pub(crate) show_rejected: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ProgramsArgs {
    /// Jurisdiction name or code, e.g. "Canada" or "IRL"
    #[arg(long)]
    pub(crate) country: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Evaluate(args) => run_evaluate(args),
        Command::Programs(args) => run_programs(args),
        Command::Demo(args) => run_demo(args),
    }
}
