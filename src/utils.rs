//! # Utilities Module
//!
//! Timing helper and small text helpers shared across the crate.

use std::time::Instant;

/// Wall-clock timer for request handling.
pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn new(name: &str) -> Self {
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Log the elapsed time and consume the timer.
    pub fn stop(self) {
        tracing::debug!(operation = %self.name, elapsed_ms = self.elapsed_ms(), "completed");
    }
}

/// Text helpers for logging and previews.
pub struct TextUtils;

impl TextUtils {
    /// Truncate to at most `max_chars` characters, appending an ellipsis when
    /// anything was cut. Operates on characters, not bytes.
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            let cut: String = text.chars().take(max_chars).collect();
            format!("{cut}...")
        }
    }

    /// First line of a text, truncated for log output.
    pub fn extract_preview(text: &str, max_chars: usize) -> String {
        let first_line = text.lines().next().unwrap_or("");
        Self::truncate(first_line, max_chars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(TextUtils::truncate("hola", 10), "hola");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let text = "discriminación laboral";
        let cut = TextUtils::truncate(text, 14);
        assert_eq!(cut, "discriminación...");
    }

    #[test]
    fn test_extract_preview_takes_first_line() {
        let text = "primera línea\nsegunda línea";
        assert_eq!(TextUtils::extract_preview(text, 50), "primera línea");
    }

    #[test]
    fn test_timer_reports_elapsed() {
        let timer = Timer::new("test");
        assert!(timer.elapsed_ms() < 1_000);
    }
}
