use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// JSON schema of the input of `plan`
    JsonSchema {
        #[arg(long, short = 'o')]
        out: PathBuf,

        /// Schema of the input of `batch` instead
        #[arg(long)]
        batch: bool,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::JsonSchema { out, batch } => {
            let schema = if batch {
                courier_planner::json::schema::generate_batch_json_schema()?
            } else {
                courier_planner::json::schema::generate_json_schema()?
            };

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, schema)?;
        }
    }

    Ok(())
}
