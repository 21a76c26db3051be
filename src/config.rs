//! Cache location defaults.

use std::path::PathBuf;

/// Get the default cache root directory.
///
/// Resolves to `<platform data dir>/pi-remote/timeline-cache` (e.g.
/// `~/Library/Application Support/pi-remote/timeline-cache` on macOS,
/// `~/.local/share/pi-remote/timeline-cache` on Linux). Falls back to a
/// dot-directory under the home directory when no platform data dir is
/// available. The directory is created lazily on first use, not here.
#[must_use]
pub fn default_cache_root() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("pi-remote").join("timeline-cache")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".pi-remote").join("timeline-cache")
    } else {
        PathBuf::from(".pi-remote").join("timeline-cache")
    }
}
