use std::path::PathBuf;

use clap::Args;
use courier_planner::json::{types::JsonRouteRequest, validation::Validate};
use tracing::info;

use crate::{
    file_utils::read_json,
    planner::PlannerArgs,
    table::{route_summary, route_table},
};

#[derive(Args)]
pub struct PlanArgs {
    /// Route request file
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Print the route as JSON
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    planner: PlannerArgs,
}

pub async fn run(args: PlanArgs) -> anyhow::Result<()> {
    let request: JsonRouteRequest = read_json(&args.input)?;
    request.validate()?;

    info!(
        "Planning {} stops for {}",
        request.delivery_locations.len(),
        request.driver_id
    );

    let planner = args.planner.planner()?;
    let route = planner
        .plan(
            &request.driver_id,
            &request.start_location,
            &request.delivery_locations,
        )
        .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&route)?);
    } else {
        println!("{}", route_table(&route));
        println!("{}", route_summary(&route));
    }

    Ok(())
}
