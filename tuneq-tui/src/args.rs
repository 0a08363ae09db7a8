use std::{path::PathBuf, time::Duration};

use clap::Parser;
use tuneq_core::config::EngineConfig;

/// Command-line arguments for tuneq
#[derive(Parser, Debug)]
#[command(name = "tuneq")]
#[command(about = "Terminal playback queue for a JSON music library")]
#[command(version)]
pub struct Args {
    /// Library file with tracks and playlists
    #[arg(default_value = "library.json", env = "TUNEQ_LIBRARY")]
    pub library: PathBuf,

    /// Playlist id to queue on startup
    #[arg(short, long, env = "TUNEQ_PLAYLIST")]
    pub playlist: Option<String>,

    /// Start with repeat enabled
    #[arg(short, long)]
    pub repeat: bool,

    /// Pause between a track ending and the next one starting
    #[arg(long, default_value = "2000", env = "TUNEQ_ADVANCE_DELAY_MS")]
    pub advance_delay_ms: u64,

    /// Give up on a duration probe after this long
    #[arg(long, default_value = "10000", env = "TUNEQ_PROBE_TIMEOUT_MS")]
    pub probe_timeout_ms: u64,

    /// Print the startup queue and exit without opening the TUI
    #[arg(long)]
    pub print: bool,
}

impl Args {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            advance_delay: Duration::from_millis(self.advance_delay_ms),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            repeat: self.repeat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let args = Args::try_parse_from(["tuneq"]).unwrap();
        assert_eq!(args.library, PathBuf::from("library.json"));
        assert!(!args.print);
        assert_eq!(args.engine_config(), EngineConfig::default());
    }

    #[test]
    fn flags_reach_engine_config() {
        let args = Args::try_parse_from([
            "tuneq",
            "music.json",
            "--repeat",
            "--advance-delay-ms",
            "250",
            "-p",
            "road-trip",
        ])
        .unwrap();
        let config = args.engine_config();
        assert!(config.repeat);
        assert_eq!(config.advance_delay, Duration::from_millis(250));
        assert_eq!(args.playlist.as_deref(), Some("road-trip"));
        assert_eq!(args.library, PathBuf::from("music.json"));
    }
}
