use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use courier_providers::{
    ProviderError,
    google_maps::{GoogleMapsClient, GoogleMapsClientParams},
    travel_leg::TravelLeg,
};
use jiff::{SignedDuration, Timestamp};
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::{
    problem::{
        estimate_quality::EstimateQuality,
        location::Location,
        meters::Meters,
        route::{Route, RouteStop},
    },
    traffic::traffic_source::TrafficSource,
};

pub fn departure() -> Timestamp {
    "2025-06-10T08:00:00Z".parse().unwrap()
}

pub fn location(lat: f64, lon: f64) -> Location {
    Location::new(lat, lon, format!("{lat},{lon}"))
}

/// `count` locations on the equator, from (0, 1) to (0, count)
pub fn create_location_row(count: usize) -> Vec<Location> {
    (1..=count).map(|i| location(0.0, i as f64)).collect()
}

/// Route starting at (0, 0) with one stop per `(meters, seconds)` leg.
pub fn create_route(legs: &[(f64, i64)]) -> Route {
    let mut arrival = departure();
    let stops = legs
        .iter()
        .enumerate()
        .map(|(index, &(distance, seconds))| {
            let duration = SignedDuration::from_secs(seconds);
            arrival += duration;
            RouteStop::new(
                location(0.0, (index + 1) as f64),
                index + 1,
                Meters::new(distance),
                duration,
                arrival,
                EstimateQuality::Exact,
            )
        })
        .collect();

    Route::from_stops(String::from("driver"), location(0.0, 0.0), stops, departure())
}

/// Reports the same traffic delay for every query and counts the calls.
pub struct StubTrafficSource {
    delay_minutes: f64,
    calls: AtomicUsize,
}

impl StubTrafficSource {
    pub fn with_delay_minutes(delay_minutes: f64) -> Self {
        Self {
            delay_minutes,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TrafficSource for StubTrafficSource {
    async fn travel_conditions(
        &self,
        _from: &Location,
        _to: &Location,
    ) -> Result<Option<TravelLeg>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let time = 600.0;
        Ok(Some(
            TravelLeg::new(5000.0, time).with_traffic_time(time + self.delay_minutes * 60.0),
        ))
    }
}

pub struct FailingTrafficSource;

impl TrafficSource for FailingTrafficSource {
    async fn travel_conditions(
        &self,
        _from: &Location,
        _to: &Location,
    ) -> Result<Option<TravelLeg>, ProviderError> {
        Err(ProviderError::IncompleteResponse)
    }
}

/// Local stand-in for the Directions API. Every leg is 1km long and takes
/// `leg_seconds`, the queries it receives are recorded.
#[derive(Clone)]
pub struct DirectionsServer {
    leg_seconds: f64,
    traffic_seconds: Option<f64>,
    missing_last_leg: bool,
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

impl DirectionsServer {
    pub fn new(leg_seconds: f64) -> Self {
        Self {
            leg_seconds,
            traffic_seconds: None,
            missing_last_leg: false,
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_traffic_seconds(mut self, traffic_seconds: f64) -> Self {
        self.traffic_seconds = Some(traffic_seconds);
        self
    }

    /// Answers with one leg less than requested.
    pub fn with_missing_last_leg(mut self) -> Self {
        self.missing_last_leg = true;
        self
    }

    pub fn queries(&self) -> Vec<HashMap<String, String>> {
        self.queries.lock().clone()
    }

    /// Binds an ephemeral port and returns a client pointed at it.
    pub async fn start(&self) -> Arc<GoogleMapsClient> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/directions", get(directions))
            .with_state(self.clone());

        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let mut params = GoogleMapsClientParams::new(String::from("test-key"));
        params.base_url = format!("http://{address}/directions");
        Arc::new(GoogleMapsClient::new(params))
    }
}

async fn directions(
    State(server): State<DirectionsServer>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    let waypoints = query
        .get("waypoints")
        .map_or(0, |waypoints| waypoints.split('|').count());
    server.queries.lock().push(query);

    let mut leg_count = waypoints + 1;
    if server.missing_last_leg {
        leg_count -= 1;
    }

    let legs: Vec<Value> = (0..leg_count)
        .map(|_| {
            let mut leg = json!({
                "distance": { "value": 1000.0 },
                "duration": { "value": server.leg_seconds },
            });
            if let Some(traffic_seconds) = server.traffic_seconds {
                leg["duration_in_traffic"] = json!({ "value": traffic_seconds });
            }
            leg
        })
        .collect();

    Json(json!({ "status": "OK", "routes": [{ "legs": legs }] }))
}
