//! Bottom-to-top fade overlay drawn over the last rows of a collapsed text.

use crate::core::animation::{MAX_ALPHA, MIN_ALPHA};
use crate::core::text::styled::Color;

/// Rows covered by the gradient, counted from the bottom.
pub const FADE_ROWS: usize = 2;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeOverlay {
    color: Color,
    alpha: u8,
}

impl FadeOverlay {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            alpha: MAX_ALPHA,
        }
    }

    /// Opaque while collapsed with truncation, transparent otherwise.
    pub fn for_state(color: Color, expanded: bool, truncates: bool) -> Self {
        let alpha = if !expanded && truncates {
            MAX_ALPHA
        } else {
            MIN_ALPHA
        };
        Self::new(color).with_alpha(alpha)
    }

    pub fn with_alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn is_visible(&self) -> bool {
        self.alpha > MIN_ALPHA && !self.color.is_transparent()
    }

    /// Gradient coverage of `row` (0 = top) in a block of `rows` rows: full strength on the bottom
    /// row, fading to transparent above the covered region.
    pub fn coverage(&self, row: usize, rows: usize) -> f32 {
        let region = FADE_ROWS.min(rows);
        let first = rows - region;
        if row < first || row >= rows {
            return 0.0;
        }
        let position = (row - first + 1) as f32 / region as f32;
        position * (self.alpha as f32 / MAX_ALPHA as f32)
    }

    /// Recolors the covered rows. Existing resets inside a row re-apply the overlay color.
    pub fn apply(&self, lines: &mut [String]) {
        if !self.is_visible() {
            return;
        }
        let rows = lines.len();
        for (row, line) in lines.iter_mut().enumerate() {
            let coverage = self.coverage(row, rows);
            if coverage <= 0.0 {
                continue;
            }
            let sgr = self.color.scaled(coverage).fg_sgr();
            let body = line.replace(RESET, &format!("{RESET}{sgr}"));
            *line = format!("{sgr}{body}{RESET}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FadeOverlay;
    use crate::core::text::styled::Color;
    use pretty_assertions::assert_eq;

    #[test]
    fn state_drives_opacity() {
        assert_eq!(FadeOverlay::for_state(Color::WHITE, false, true).alpha(), 255);
        assert_eq!(FadeOverlay::for_state(Color::WHITE, true, true).alpha(), 0);
        assert_eq!(FadeOverlay::for_state(Color::WHITE, false, false).alpha(), 0);
    }

    #[test]
    fn gradient_is_strongest_at_the_bottom() {
        let overlay = FadeOverlay::new(Color::WHITE);
        assert_eq!(overlay.coverage(0, 3), 0.0);
        assert_eq!(overlay.coverage(1, 3), 0.5);
        assert_eq!(overlay.coverage(2, 3), 1.0);
    }

    #[test]
    fn apply_recolors_only_covered_rows() {
        let overlay = FadeOverlay::new(Color::WHITE);
        let mut lines = vec!["top".to_string(), "mid".to_string(), "end".to_string()];
        overlay.apply(&mut lines);

        assert_eq!(lines[0], "top");
        assert_eq!(lines[1], "\x1b[38;2;128;128;128mmid\x1b[0m");
        assert_eq!(lines[2], "\x1b[38;2;255;255;255mend\x1b[0m");
    }

    #[test]
    fn transparent_overlay_draws_nothing() {
        let overlay = FadeOverlay::new(Color::TRANSPARENT);
        let mut lines = vec!["a".to_string()];
        overlay.apply(&mut lines);
        assert_eq!(lines, vec!["a".to_string()]);
    }
}
