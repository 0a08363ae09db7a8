use std::time::Duration;

/// Pause between the end of a track and the automatic advance
pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_secs(2);

/// How long a duration probe may run before falling back
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Tunables for the queue engine service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub advance_delay: Duration,
    pub probe_timeout: Duration,
    /// Initial repeat flag
    pub repeat: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            repeat: false,
        }
    }
}
