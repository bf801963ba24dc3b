//! Test data builders for creating test objects

use sortvis_rs::config::{AppConfig, HistoryConfig, PlaybackConfig};

/// Builder for test configurations
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn base_delay_ms(mut self, ms: u64) -> Self {
        self.config.playback.base_delay_ms = ms;
        self
    }

    pub fn looping(mut self) -> Self {
        self.config.playback.loop_playback = true;
        self
    }

    pub fn auto_play(mut self) -> Self {
        self.config.playback.auto_play = true;
        self
    }

    pub fn max_snapshots(mut self, max: usize) -> Self {
        self.config.history = HistoryConfig { max_snapshots: max };
        self
    }

    pub fn playback(&self) -> PlaybackConfig {
        self.config.playback.clone()
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .base_delay_ms(100)
            .looping()
            .max_snapshots(5)
            .build();

        assert_eq!(config.playback.base_delay_ms, 100);
        assert!(config.playback.loop_playback);
        assert!(!config.playback.auto_play);
        assert_eq!(config.history.max_snapshots, 5);
    }
}
