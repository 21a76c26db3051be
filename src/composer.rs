//! Text-composer height arithmetic.
//!
//! Pure layout math with no state: given a line count and pixel metrics,
//! compute the composer's height, growing with content between a minimum
//! and maximum number of visible lines.

/// Pixel metrics for the text composer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposerMetrics {
    /// Height of one text line in pixels.
    pub line_height: f64,

    /// Padding above the text.
    pub padding_top: f64,

    /// Padding below the text.
    pub padding_bottom: f64,

    /// Smallest number of lines the composer shows.
    pub min_lines: u32,

    /// Largest number of lines before the composer scrolls internally.
    pub max_lines: u32,
}

impl Default for ComposerMetrics {
    fn default() -> Self {
        Self {
            line_height: 20.0,
            padding_top: 8.0,
            padding_bottom: 8.0,
            min_lines: 1,
            max_lines: 8,
        }
    }
}

/// Compute the composer height in pixels for the given number of content
/// lines. The visible line count is clamped to `[min_lines, max_lines]`
/// (with a floor of one line), then padding is added.
#[must_use]
pub fn composer_height(line_count: u32, metrics: &ComposerMetrics) -> f64 {
    let min = metrics.min_lines.max(1);
    let max = metrics.max_lines.max(min);
    let lines = line_count.clamp(min, max);
    f64::from(lines) * metrics.line_height + metrics.padding_top + metrics.padding_bottom
}
