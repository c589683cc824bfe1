use std::time::Duration;

use crate::traits::EveryNth;

/// Knobs for one rank enrichment run.
#[derive(Debug, Clone)]
pub struct EnrichConfig {
    /// Pause after every `throttle_every` new lookups. 0 disables the pause.
    pub throttle_every: usize,
    pub throttle_pause: Duration,
    /// Request and export display names alongside ranks.
    pub with_names: bool,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            throttle_every: 10,
            throttle_pause: Duration::from_secs(1),
            with_names: false,
        }
    }
}

impl EnrichConfig {
    pub fn throttle(&self) -> EveryNth {
        EveryNth::new(self.throttle_every, self.throttle_pause)
    }

    pub fn log_settings(&self) {
        tracing::info!("Enrichment config:");
        tracing::info!("  throttle: {} lookups / {:?}", self.throttle_every, self.throttle_pause);
        tracing::info!("  with_names: {}", self.with_names);
    }
}
