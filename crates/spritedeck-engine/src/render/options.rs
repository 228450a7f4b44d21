use crate::coords::{Rect, Vec2};
use crate::paint::Color;

/// How the stage surface is sized when it mounts.
///
/// The size is resolved once, from the window size at mount time. Window
/// resizes afterwards do not change it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StageSizing {
    /// Everything right of the reserved left strip, full window height.
    FillWindow,
    /// Fixed logical size, placed right of the reserved left strip.
    Fixed { width: f32, height: f32 },
}

impl StageSizing {
    /// Stage rect for a window of `window` logical size with `left` pixels
    /// reserved on the left edge.
    pub fn resolve(self, window: Vec2, left: f32) -> Rect {
        let left = left.clamp(0.0, window.x.max(0.0));
        match self {
            StageSizing::FillWindow => Rect::new(left, 0.0, window.x - left, window.y.max(0.0)),
            StageSizing::Fixed { width, height } => {
                Rect::new(left, 0.0, width.max(0.0), height.max(0.0))
            }
        }
    }
}

/// Static options handed to the stage renderer at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOptions {
    pub background: Color,
    pub sizing: StageSizing,
}

impl Default for StageOptions {
    fn default() -> Self {
        Self {
            background: Color::RED,
            sizing: StageSizing::FillWindow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_window_takes_remaining_width() {
        let r = StageSizing::FillWindow.resolve(Vec2::new(1280.0, 720.0), 240.0);
        assert_eq!(r, Rect::new(240.0, 0.0, 1040.0, 720.0));
    }

    #[test]
    fn fixed_ignores_window_size() {
        let r = StageSizing::Fixed { width: 1000.0, height: 600.0 }
            .resolve(Vec2::new(800.0, 720.0), 240.0);
        assert_eq!(r, Rect::new(240.0, 0.0, 1000.0, 600.0));
    }

    #[test]
    fn reserved_strip_wider_than_window_leaves_empty_stage() {
        let r = StageSizing::FillWindow.resolve(Vec2::new(100.0, 50.0), 240.0);
        assert!(r.is_empty());
        assert_eq!(r.origin.x, 100.0);
    }

    #[test]
    fn default_background_is_red() {
        assert_eq!(StageOptions::default().background, Color::RED);
    }
}
