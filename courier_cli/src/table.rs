use comfy_table::{Table, presets::UTF8_FULL};
use courier_planner::{error::PlanningError, problem::route::Route};

pub fn route_table(route: &Route) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#",
        "Address",
        "Order",
        "Distance (km)",
        "Duration (min)",
        "ETA",
    ]);

    for stop in route.stops() {
        table.add_row(vec![
            stop.sequence_number().to_string(),
            stop.location().address().to_owned(),
            stop.location().order_id().unwrap_or("-").to_owned(),
            format!("{:.2}", stop.distance().value() / 1000.0),
            format!("{:.1}", stop.duration().as_secs_f64() / 60.0),
            stop.estimated_arrival().to_string(),
        ]);
    }

    table
}

pub fn route_summary(route: &Route) -> String {
    format!(
        "{}: {} stops, {:.2} km, {:.1} min, completes at {} ({:?})",
        route.driver_id(),
        route.len(),
        route.total_distance().value() / 1000.0,
        route.total_duration().as_secs_f64() / 60.0,
        route.estimated_completion(),
        route.estimate_quality(),
    )
}

pub fn batch_table(drivers: &[String], results: &[Result<Route, PlanningError>]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Driver",
        "Status",
        "Stops",
        "Distance (km)",
        "Completion",
    ]);

    for (driver, result) in drivers.iter().zip(results) {
        let row = match result {
            Ok(route) => vec![
                driver.clone(),
                String::from("ok"),
                route.len().to_string(),
                format!("{:.2}", route.total_distance().value() / 1000.0),
                route.estimated_completion().to_string(),
            ],
            Err(error) => vec![
                driver.clone(),
                format!("failed: {error}"),
                String::from("-"),
                String::from("-"),
                String::from("-"),
            ],
        };

        table.add_row(row);
    }

    table
}
