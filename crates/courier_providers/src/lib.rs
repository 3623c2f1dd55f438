pub mod as_the_crow_flies;
pub mod google_maps;
pub mod provider_error;
pub mod travel_leg;
pub mod travel_provider;

pub use provider_error::ProviderError;
