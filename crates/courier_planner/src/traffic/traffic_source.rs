use std::{future::Future, sync::Arc};

use courier_providers::{ProviderError, google_maps::GoogleMapsClient, travel_leg::TravelLeg};

use crate::problem::location::Location;

pub trait TrafficSource: Send + Sync {
    /// Current conditions between two locations, `Ok(None)` when no live
    /// provider is available.
    fn travel_conditions(
        &self,
        from: &Location,
        to: &Location,
    ) -> impl Future<Output = Result<Option<TravelLeg>, ProviderError>> + Send;
}

pub enum TrafficFeed {
    Disabled,
    GoogleMaps(Arc<GoogleMapsClient>),
}

impl TrafficFeed {
    pub fn new(client: Option<Arc<GoogleMapsClient>>) -> Self {
        match client {
            Some(client) => TrafficFeed::GoogleMaps(client),
            None => TrafficFeed::Disabled,
        }
    }
}

impl TrafficSource for TrafficFeed {
    async fn travel_conditions(
        &self,
        from: &Location,
        to: &Location,
    ) -> Result<Option<TravelLeg>, ProviderError> {
        match self {
            TrafficFeed::Disabled => Ok(None),
            TrafficFeed::GoogleMaps(client) => client.fetch_traffic(from, to).await.map(Some),
        }
    }
}
