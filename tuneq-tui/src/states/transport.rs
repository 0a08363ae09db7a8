use std::time::Instant;

use tuneq_core::Track;

/// Simulated playback surface: a clock running over the current track
#[derive(Debug, Clone)]
pub struct TransportState {
    /// Whether the clock is running
    pub is_playing: bool,
    /// Current playback position in seconds
    pub position: f32,
    /// Total duration in seconds, 0 while unknown
    pub duration: f32,
    /// Id of the loaded track
    pub track_id: Option<String>,
    last_tick: Option<Instant>,
    end_reported: bool,
}

impl TransportState {
    pub fn new() -> Self {
        Self {
            is_playing: false,
            position: 0.0,
            duration: 0.0,
            track_id: None,
            last_tick: None,
            end_reported: false,
        }
    }

    /// Start the given track from the beginning
    pub fn load(&mut self, track: &Track) {
        self.track_id = Some(track.id.clone());
        self.position = 0.0;
        self.duration = track.metadata.duration.unwrap_or(0) as f32;
        self.end_reported = false;
        self.play();
    }

    pub fn play(&mut self) {
        if self.track_id.is_some() && !self.end_reported {
            self.is_playing = true;
            self.last_tick = Some(Instant::now());
        }
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
        self.last_tick = None;
    }

    pub fn toggle(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Unload the track entirely
    pub fn stop(&mut self) {
        self.pause();
        self.track_id = None;
        self.position = 0.0;
        self.duration = 0.0;
        self.end_reported = false;
    }

    /// Fill in a duration that was resolved after loading
    pub fn set_duration(&mut self, seconds: u32) {
        if self.duration <= 0.0 {
            self.duration = seconds as f32;
        }
    }

    pub fn seek(&mut self, delta: f32) {
        let upper = if self.duration > 0.0 {
            self.duration
        } else {
            f32::MAX
        };
        self.position = (self.position + delta).clamp(0.0, upper);
    }

    /// Advance the clock, returns true exactly once when the track reaches its end
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.is_playing {
            return false;
        }
        if let Some(last) = self.last_tick {
            self.position += now.saturating_duration_since(last).as_secs_f32();
        }
        self.last_tick = Some(now);

        if self.duration > 0.0 && self.position >= self.duration && !self.end_reported {
            self.position = self.duration;
            self.end_reported = true;
            self.pause();
            return true;
        }
        false
    }

    /// Get the progress percentage (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration > 0.0 {
            (self.position / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Format time as MM:SS
    pub fn format_time(seconds: f32) -> String {
        tuneq_core::track::format_seconds(seconds.max(0.0).floor() as u32)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn reports_end_once() {
        let mut transport = TransportState::new();
        transport.load(&Track::new("a", "A", "X").with_duration(2));
        let start = Instant::now();

        assert!(!transport.tick(start + Duration::from_secs(1)));
        assert!(transport.tick(start + Duration::from_secs(3)));
        assert!(!transport.is_playing);
        assert!(!transport.tick(start + Duration::from_secs(4)));
        assert_eq!(transport.progress(), 1.0);
    }

    #[test]
    fn unknown_duration_never_ends() {
        let mut transport = TransportState::new();
        transport.load(&Track::new("a", "A", "X"));
        let start = Instant::now();
        assert!(!transport.tick(start + Duration::from_secs(600)));
        assert!(transport.is_playing);

        transport.set_duration(1);
        assert!(transport.tick(start + Duration::from_secs(601)));
    }

    #[test]
    fn paused_clock_does_not_move() {
        let mut transport = TransportState::new();
        transport.load(&Track::new("a", "A", "X").with_duration(100));
        transport.pause();
        transport.tick(Instant::now() + Duration::from_secs(50));
        assert_eq!(transport.position, 0.0);

        transport.seek(-5.0);
        assert_eq!(transport.position, 0.0);
        transport.seek(500.0);
        assert_eq!(transport.position, 100.0);
        assert_eq!(TransportState::format_time(transport.position), "01:40");
    }
}
