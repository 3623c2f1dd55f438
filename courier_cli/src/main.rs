use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;

use crate::{batch::BatchArgs, generate::GenerateSubcommands, plan::PlanArgs};

mod batch;
mod file_utils;
mod generate;
mod plan;
mod planner;
mod table;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plans the route of one driver
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },
    /// Plans the routes of several drivers at once
    Batch {
        #[command(flatten)]
        args: BatchArgs,
    },
    #[command(visible_alias = "g")]
    Generate {
        #[command(subcommand)]
        commands: GenerateSubcommands,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Some(Commands::Plan { args }) => plan::run(args).await?,
        Some(Commands::Batch { args }) => batch::run(args).await?,
        Some(Commands::Generate { commands }) => generate::run(commands)?,
        None => {}
    }

    Ok(())
}
