use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossbeam_channel::RecvTimeoutError;
use lofty::file::AudioFile;
use lofty::probe::Probe;

/// Seconds reported when a duration can't be determined
pub const FALLBACK_DURATION: u32 = 0;

/// Resolve a track's duration in whole seconds, giving up after `timeout`
///
/// Remote sources and unreadable files fall back to [`FALLBACK_DURATION`].
pub fn probe_duration(source: &str, timeout: Duration) -> u32 {
    if is_remote(source) {
        log::debug!("Skipping duration probe for remote source {}", source);
        return FALLBACK_DURATION;
    }

    let (tx, rx) = crossbeam_channel::bounded(1);
    let path = source.to_string();
    let start = Instant::now();

    thread::spawn(move || {
        // receiver may have timed out already
        let _ = tx.send(read_duration(Path::new(&path)));
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(seconds)) => {
            log::debug!("Probed {} in {:?}: {}s", source, start.elapsed(), seconds);
            seconds
        }
        Ok(Err(e)) => {
            log::warn!("Failed to probe duration of {}: {:#}", source, e);
            FALLBACK_DURATION
        }
        Err(RecvTimeoutError::Timeout) => {
            log::warn!("Duration probe for {} timed out after {:?}", source, timeout);
            FALLBACK_DURATION
        }
        Err(RecvTimeoutError::Disconnected) => {
            log::error!("Duration probe thread for {} exited without a result", source);
            FALLBACK_DURATION
        }
    }
}

fn read_duration(path: &Path) -> anyhow::Result<u32> {
    let tagged_file = Probe::open(path)
        .context("Failed to open the file")?
        .read()
        .context("Failed to read audio properties")?;
    Ok(tagged_file.properties().duration().as_secs() as u32)
}

fn is_remote(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
