//! Configuration constants and options for the styles block.

use std::time::Duration;

/// Name given to newly added styles.
pub const DEFAULT_STYLE_NAME: &str = "Unnamed style";

/// Example text given to newly added styles.
pub const DEFAULT_EXAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog";

/// Smallest increment of an axis value in the editor.
pub const STEP: f64 = 1.0;

/// Local slider feedback rate (updates per second).
pub const THROTTLE_FPS: u32 = 30;

/// Quiet period before a dragged value is committed to shared state.
pub const COMMIT_DEBOUNCE: Duration = Duration::from_millis(250);

/// Font file extensions that are always accepted.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// Axes rendered through `font-weight`/`font-stretch` instead of
/// `font-variation-settings`.
pub const WEIGHT_TAG: &str = "wght";
pub const WIDTH_TAG: &str = "wdth";

/// Runtime options for a styles block.
#[derive(Debug, Clone)]
pub struct Options {
    /// Accept `.woff2` assets in addition to [`ACCEPTED_EXTENSIONS`].
    pub accept_woff2: bool,

    /// Local feedback rate for slider drags.
    pub throttle_hz: u32,

    /// Debounce interval for committing slider drags.
    pub commit_debounce: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self { accept_woff2: false, throttle_hz: THROTTLE_FPS, commit_debounce: COMMIT_DEBOUNCE }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accept_woff2(mut self, accept: bool) -> Self {
        self.accept_woff2 = accept;
        self
    }

    /// Set the local feedback rate. Zero disables throttling.
    pub fn throttle_hz(mut self, hz: u32) -> Self {
        self.throttle_hz = hz;
        self
    }

    pub fn commit_debounce(mut self, interval: Duration) -> Self {
        self.commit_debounce = interval;
        self
    }

    /// Minimum spacing between local updates.
    pub fn throttle_interval(&self) -> Duration {
        match self.throttle_hz {
            0 => Duration::ZERO,
            hz => Duration::from_secs(1) / hz,
        }
    }

    /// Check whether an asset extension is accepted (case-insensitive).
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        ACCEPTED_EXTENSIONS.contains(&extension.as_str())
            || (self.accept_woff2 && extension == "woff2")
    }
}
