//! Serializes a [`SignedDuration`] as a floating-point number of seconds.

use jiff::SignedDuration;
use serde::{Deserialize, Deserializer, Serializer, de::Error};

pub fn serialize<S>(duration: &SignedDuration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<SignedDuration, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = f64::deserialize(deserializer)?;
    SignedDuration::try_from_secs_f64(seconds).map_err(D::Error::custom)
}
