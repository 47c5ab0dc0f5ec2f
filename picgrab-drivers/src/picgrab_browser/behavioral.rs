use rand::rngs::OsRng;
use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;

#[derive(Debug, Clone, Default)]
/// Produces human‑like delays to reduce automation signals.
pub struct BehavioralEngine {}

impl BehavioralEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// Pick a random duration between `min` and `max` milliseconds.
    pub fn pick_delay(&self, min: u64, max: u64) -> Duration {
        let mut rng = OsRng;
        Duration::from_millis(rng.gen_range(min..=max.max(min)))
    }

    /// Sleep for a random duration between `min` and `max` milliseconds.
    pub async fn random_delay(&self, min: u64, max: u64) {
        sleep(self.pick_delay(min, max)).await;
    }
}
