//! Submit spinner animation state

use std::time::{Duration, Instant};

/// Braille spinner frames
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner shown in the submit button while a submit is in flight
#[derive(Debug, Clone, Copy)]
pub struct SpinnerState {
    /// When the spinner started
    pub start_time: Instant,
}

impl SpinnerState {
    /// Time each frame stays on screen
    pub const FRAME_DURATION: Duration = Duration::from_millis(80);

    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }

    /// Frame index for a given elapsed time
    pub fn frame_at(elapsed: Duration) -> usize {
        let ticks = elapsed.as_millis() / Self::FRAME_DURATION.as_millis();
        (ticks % SPINNER_FRAMES.len() as u128) as usize
    }

    /// Frame to draw now
    pub fn frame(&self) -> &'static str {
        SPINNER_FRAMES[Self::frame_at(self.start_time.elapsed())]
    }
}

impl Default for SpinnerState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_advances_with_time() {
        assert_eq!(SpinnerState::frame_at(Duration::ZERO), 0);
        assert_eq!(SpinnerState::frame_at(Duration::from_millis(79)), 0);
        assert_eq!(SpinnerState::frame_at(Duration::from_millis(80)), 1);
        assert_eq!(SpinnerState::frame_at(Duration::from_millis(250)), 3);
    }

    #[test]
    fn test_frame_wraps() {
        let cycle = SpinnerState::FRAME_DURATION * SPINNER_FRAMES.len() as u32;
        assert_eq!(SpinnerState::frame_at(cycle), 0);
    }

    #[test]
    fn test_frame_is_a_known_glyph() {
        let spinner = SpinnerState::new();
        assert!(SPINNER_FRAMES.contains(&spinner.frame()));
    }
}
