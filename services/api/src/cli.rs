use crate::demo::{run_demo, run_quote, DemoArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use insurance_desk::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Insurance Operations Desk",
    about = "Run or demonstrate the insurance operations desk from the command line",
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
    /// Walk through policy auditing, claims and affiliate referrals end to end
    Demo(DemoArgs),
    /// Print the commission quote for one segment and partner tier
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Seed the A/B variant stream (overrides APP_VARIANT_SEED)
    #[arg(long)]
    pub(crate) variant_seed: Option<u64>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Quote(args) => run_quote(args),
    }
}
