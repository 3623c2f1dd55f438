use std::{ops::Range, time::Duration};

use jiff::Timestamp;
use serde::Deserialize;
use tracing::debug;

use crate::{provider_error::ProviderError, travel_leg::TravelLeg};

pub const GOOGLE_MAPS_DIRECTIONS_API_URL: &str =
    "https://maps.googleapis.com/maps/api/directions/json";

/// The Directions API accepts at most 25 intermediate waypoints per request.
pub const MAX_WAYPOINTS: usize = 25;

const MAX_POINTS_PER_REQUEST: usize = MAX_WAYPOINTS + 2;

#[derive(Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<DirectionsRoute>,
}

#[derive(Deserialize)]
struct DirectionsRoute {
    #[serde(default)]
    legs: Vec<DirectionsLeg>,
}

#[derive(Deserialize)]
struct DirectionsLeg {
    distance: Option<DirectionsValue>,
    duration: Option<DirectionsValue>,
    duration_in_traffic: Option<DirectionsValue>,
}

#[derive(Deserialize)]
struct DirectionsValue {
    value: f64,
}

impl DirectionsLeg {
    fn to_travel_leg(&self) -> Option<TravelLeg> {
        let distance = self.distance.as_ref()?.value;
        let time = self.duration.as_ref()?.value;

        let leg = TravelLeg::new(distance, time);

        Some(match &self.duration_in_traffic {
            Some(traffic) => leg.with_traffic_time(traffic.value),
            None => leg,
        })
    }
}

pub struct GoogleMapsClientParams {
    pub api_key: String,
    pub base_url: String,
    pub route_timeout: Duration,
    pub traffic_timeout: Duration,
}

impl GoogleMapsClientParams {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: GOOGLE_MAPS_DIRECTIONS_API_URL.to_string(),
            route_timeout: Duration::from_secs(10),
            traffic_timeout: Duration::from_secs(5),
        }
    }
}

pub struct GoogleMapsClient {
    params: GoogleMapsClientParams,
    client: reqwest::Client,
}

impl GoogleMapsClient {
    pub fn new(params: GoogleMapsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// Legs along `points` in the given order, one per consecutive pair.
    ///
    /// At most `MAX_WAYPOINTS + 2` points are sent in one request, use
    /// [`waypoint_chunks`] to split longer paths. A leg the provider did not
    /// describe is `None`.
    pub async fn fetch_legs<P>(
        &self,
        points: &[P],
        departure: Timestamp,
    ) -> Result<Vec<Option<TravelLeg>>, ProviderError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        if points.len() < 2 {
            return Ok(Vec::new());
        }

        let points: Vec<geo_types::Point> = points.iter().map(|point| point.into()).collect();
        let expected_legs = points.len() - 1;
        let response = self
            .directions_request(&points, departure, self.params.route_timeout)
            .await?;

        debug!("GoogleMaps: received directions for {} legs", expected_legs);

        parse_legs(response, expected_legs)
    }

    /// Current conditions between two points, `traffic_time` is set when the
    /// provider knows about live traffic.
    pub async fn fetch_traffic<P>(&self, from: &P, to: &P) -> Result<TravelLeg, ProviderError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let points: [geo_types::Point; 2] = [from.into(), to.into()];
        let response = self
            .directions_request(&points, Timestamp::now(), self.params.traffic_timeout)
            .await?;

        parse_legs(response, 1)?
            .into_iter()
            .next()
            .flatten()
            .ok_or(ProviderError::IncompleteResponse)
    }

    async fn directions_request(
        &self,
        points: &[geo_types::Point],
        departure: Timestamp,
        timeout: Duration,
    ) -> Result<DirectionsResponse, ProviderError> {
        let coordinates: Vec<String> = points.iter().map(format_point).collect();
        let (origin, rest) = coordinates
            .split_first()
            .ok_or(ProviderError::IncompleteResponse)?;
        let (destination, waypoints) = rest
            .split_last()
            .ok_or(ProviderError::IncompleteResponse)?;

        let mut query = vec![
            ("origin", origin.clone()),
            ("destination", destination.clone()),
            ("departure_time", departure_param(departure)),
            ("traffic_model", String::from("best_guess")),
            ("key", self.params.api_key.clone()),
        ];

        if !waypoints.is_empty() {
            query.push(("waypoints", waypoints.join("|")));
        }

        let response = self
            .client
            .get(self.params.base_url.as_str())
            .query(&query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|error| ProviderError::from_request(error, timeout))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api { status, message });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|error| ProviderError::from_request(error, timeout))?;

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Splits a path of `len` points into overlapping ranges that each fit in a
/// single directions request. Consecutive ranges share their boundary point
/// so every leg belongs to exactly one range.
pub fn waypoint_chunks(len: usize) -> Vec<Range<usize>> {
    let mut chunks = Vec::new();
    if len < 2 {
        return chunks;
    }

    let mut start = 0;
    while start < len - 1 {
        let end = (start + MAX_POINTS_PER_REQUEST).min(len);
        chunks.push(start..end);
        start = end - 1;
    }

    chunks
}

fn format_point(point: &geo_types::Point) -> String {
    format!("{},{}", point.y(), point.x())
}

fn departure_param(departure: Timestamp) -> String {
    // The API rejects departure times in the past
    if departure > Timestamp::now() {
        departure.as_second().to_string()
    } else {
        String::from("now")
    }
}

fn parse_legs(
    response: DirectionsResponse,
    expected_legs: usize,
) -> Result<Vec<Option<TravelLeg>>, ProviderError> {
    if response.status != "OK" {
        return Err(ProviderError::Status {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(ProviderError::IncompleteResponse)?;

    let mut legs: Vec<Option<TravelLeg>> = route
        .legs
        .iter()
        .take(expected_legs)
        .map(DirectionsLeg::to_travel_leg)
        .collect();

    legs.resize(expected_legs, None);

    Ok(legs)
}
