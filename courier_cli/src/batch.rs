use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::Args;
use courier_planner::{
    json::{
        types::{JsonBatchOutcome, JsonBatchRouteRequest, JsonRouteRequest},
        validation::Validate,
    },
    solver::batch_coordinator::BatchCoordinator,
};
use tracing::info;

use crate::{
    file_utils::{read_json, read_json_files},
    planner::PlannerArgs,
    table::batch_table,
};

#[derive(Args)]
pub struct BatchArgs {
    /// A batch request file, or a folder of route request files
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Print the outcomes as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    planner: PlannerArgs,
}

fn read_batch(input: &Path) -> anyhow::Result<JsonBatchRouteRequest> {
    if input.is_file() {
        return read_json(input);
    }

    let deliveries = read_json_files(input)?
        .iter()
        .map(|path| read_json::<JsonRouteRequest>(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(JsonBatchRouteRequest { deliveries })
}

pub async fn run(args: BatchArgs) -> anyhow::Result<()> {
    let batch = read_batch(&args.input)?;
    batch.validate()?;

    info!("Planning {} routes", batch.deliveries.len());

    let drivers: Vec<String> = batch
        .deliveries
        .iter()
        .map(|request| request.driver_id.clone())
        .collect();

    let coordinator = BatchCoordinator::new(
        Arc::new(args.planner.planner()?),
        args.planner.params().batch_concurrency,
    );
    let results = coordinator.plan_batch(batch.deliveries).await;

    let failed = results.iter().filter(|result| result.is_err()).count();
    info!("Planned {} routes, {} failed", results.len() - failed, failed);

    if args.json {
        let outcomes: Vec<JsonBatchOutcome> = results.into_iter().map(Into::into).collect();
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("{}", batch_table(&drivers, &results));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;

    #[test]
    fn test_read_batch_from_folder() {
        let folder = env::current_dir().unwrap().join("tests/fixtures/requests");
        let batch = read_batch(&folder).unwrap();

        let drivers: Vec<&str> = batch
            .deliveries
            .iter()
            .map(|request| request.driver_id.as_str())
            .collect();

        assert_eq!(drivers, vec!["driver-1", "driver-2"]);
    }
}
