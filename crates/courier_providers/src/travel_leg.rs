/// TravelLeg holds the distance and travel times of a single leg
/// between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelLeg {
    /// Meters
    pub distance: f64,

    /// Seconds, free-flowing traffic
    pub time: f64,

    // Only live providers know about current traffic
    pub traffic_time: Option<f64>,
}

impl TravelLeg {
    pub fn new(distance: f64, time: f64) -> Self {
        TravelLeg {
            distance,
            time,
            traffic_time: None,
        }
    }

    pub fn with_traffic_time(mut self, traffic_time: f64) -> Self {
        self.traffic_time = Some(traffic_time);
        self
    }

    /// Expected travel time, accounting for traffic when known.
    pub fn expected_time(&self) -> f64 {
        self.traffic_time.unwrap_or(self.time)
    }

    /// Extra seconds caused by traffic, never negative.
    pub fn traffic_delay(&self) -> f64 {
        match self.traffic_time {
            Some(traffic_time) => (traffic_time - self.time).max(0.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_time_prefers_traffic() {
        let leg = TravelLeg::new(1000.0, 120.0);
        assert_eq!(leg.expected_time(), 120.0);

        let leg = leg.with_traffic_time(300.0);
        assert_eq!(leg.expected_time(), 300.0);
        assert_eq!(leg.traffic_delay(), 180.0);
    }

    #[test]
    fn test_traffic_delay_is_clamped() {
        let leg = TravelLeg::new(1000.0, 120.0).with_traffic_time(100.0);
        assert_eq!(leg.traffic_delay(), 0.0);
    }
}
