use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use courier_planner::{problem::kmh::Kmh, solver::planner_params::PlannerParams};
use courier_providers::{
    google_maps::GoogleMapsClientParams,
    travel_provider::{DEFAULT_SPEED_KMH, TravelProvider},
};
use jiff::SignedDuration;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3009";

/// Everything the service reads from the environment.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub bind_address: SocketAddr,
    pub google_maps_api_key: Option<String>,
    pub average_speed_kmh: f64,
    pub traffic_ttl: Duration,
    pub traffic_cache_capacity: usize,
    pub batch_concurrency: usize,
    pub route_timeout: Duration,
    pub traffic_timeout: Duration,

    /// Internal error details are only sent to clients outside of production
    pub production: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 3009)),
            google_maps_api_key: None,
            average_speed_kmh: DEFAULT_SPEED_KMH,
            traffic_ttl: Duration::from_secs(300),
            traffic_cache_capacity: 1000,
            batch_concurrency: 8,
            route_timeout: Duration::from_secs(10),
            traffic_timeout: Duration::from_secs(5),
            production: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = ServiceConfig::default();
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let seconds = |name: &str, default: Duration| -> anyhow::Result<Duration> {
            parse_or(name, var(name), default.as_secs()).map(Duration::from_secs)
        };

        let average_speed_kmh = parse_or(
            "COURIER_AVERAGE_SPEED_KMH",
            var("COURIER_AVERAGE_SPEED_KMH"),
            defaults.average_speed_kmh,
        )?;
        if !(average_speed_kmh.is_finite() && average_speed_kmh > 0.0) {
            anyhow::bail!("COURIER_AVERAGE_SPEED_KMH must be a positive number");
        }

        Ok(Self {
            bind_address: parse_or(
                "COURIER_BIND_ADDRESS",
                var("COURIER_BIND_ADDRESS"),
                defaults.bind_address,
            )?,
            google_maps_api_key: var("GOOGLE_MAPS_API_KEY"),
            average_speed_kmh,
            traffic_ttl: seconds("COURIER_TRAFFIC_TTL_SECONDS", defaults.traffic_ttl)?,
            traffic_cache_capacity: parse_or(
                "COURIER_TRAFFIC_CACHE_CAPACITY",
                var("COURIER_TRAFFIC_CACHE_CAPACITY"),
                defaults.traffic_cache_capacity,
            )?,
            batch_concurrency: parse_or(
                "COURIER_BATCH_CONCURRENCY",
                var("COURIER_BATCH_CONCURRENCY"),
                defaults.batch_concurrency,
            )?,
            route_timeout: seconds("COURIER_ROUTE_TIMEOUT_SECONDS", defaults.route_timeout)?,
            traffic_timeout: seconds("COURIER_TRAFFIC_TIMEOUT_SECONDS", defaults.traffic_timeout)?,
            production: var("COURIER_ENV").is_some_and(|env| env.eq_ignore_ascii_case("production")),
        })
    }

    pub fn planner_params(&self) -> PlannerParams {
        PlannerParams {
            travel_provider: TravelProvider::GoogleMaps,
            average_speed: Kmh::new(self.average_speed_kmh),
            traffic_freshness: SignedDuration::from_secs(self.traffic_ttl.as_secs() as i64),
            traffic_cache_capacity: self.traffic_cache_capacity,
            batch_concurrency: self.batch_concurrency,
            ..PlannerParams::default()
        }
    }

    /// `None` without an API key, the planner then only estimates
    /// geometrically.
    pub fn google_maps_params(&self) -> Option<GoogleMapsClientParams> {
        self.google_maps_api_key.as_ref().map(|api_key| GoogleMapsClientParams {
            route_timeout: self.route_timeout,
            traffic_timeout: self.traffic_timeout,
            ..GoogleMapsClientParams::new(api_key.clone())
        })
    }
}

fn parse_or<T>(name: &str, value: Option<String>, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => value
            .parse()
            .with_context(|| format!("Invalid value for {name}: {value:?}")),
        None => Ok(default),
    }
}
