//! Screen geometry for the channel bar dashboard
//!
//! Columns are laid out left to right with any spare width spread evenly
//! between them. When not every channel fits, at least one blank cell is
//! kept between columns and the window scrolls with the focus.

/// Smallest usable screen width
pub const MIN_WIDTH: u16 = 23;
/// Smallest usable screen height
pub const MIN_HEIGHT: u16 = 19;

const OFFSET_X: i32 = 2;
const OFFSET_Y: i32 = 2;
/// Width of one channel column: 3 digits, `<>`, 3 digits, 1 gap
pub const COLUMN_WIDTH: f32 = 9.0;
const BASE_BAR_HEIGHT: i32 = 10;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    /// Screen width used for drawing, never below [`MIN_WIDTH`]
    pub max_x: u16,
    /// Screen height used for drawing, never below [`MIN_HEIGHT`]
    pub max_y: u16,
    pub n_visible: usize,
    pub extra_space: f32,
    pub bar_height: u16,
}

impl Layout {
    pub fn compute(width: u16, height: u16, n_channels: usize) -> Self {
        let max_x = width.max(MIN_WIDTH);
        let max_y = height.max(MIN_HEIGHT);
        let usable = i32::from(max_x) - 2 * OFFSET_X;

        let fit = |extra: f32| -> usize {
            let n = ((usable + 1) as f32 / (COLUMN_WIDTH + extra)) as usize;
            n.min(n_channels)
        };
        let spread = |n_visible: usize| -> f32 {
            if n_visible <= 1 {
                0.0
            } else {
                (usable as f32 - 1.0 - n_visible as f32 * COLUMN_WIDTH) / (n_visible - 1) as f32
            }
        };

        let mut n_visible = fit(0.0);
        let mut extra_space = spread(n_visible);
        if n_visible < n_channels {
            extra_space = extra_space.max(1.0);
            n_visible = fit(extra_space);
            extra_space = spread(n_visible);
        }

        let bar_height = BASE_BAR_HEIGHT + (i32::from(max_y) - i32::from(MIN_HEIGHT) - 1).max(0) / 2;

        Self {
            max_x,
            max_y,
            n_visible,
            extra_space,
            bar_height: bar_height as u16,
        }
    }

    /// Top-left cell of the label row for the `slot`th visible column
    pub fn column_pos(&self, slot: usize) -> (u16, u16) {
        let x = (OFFSET_X + 1) as f32 + slot as f32 * (COLUMN_WIDTH + self.extra_space);
        let y = OFFSET_Y + i32::from(self.max_y) / 2 + i32::from(self.bar_height) / 2 + 1;
        (x as u16, y as u16)
    }

    /// Position of channel `index`, or `None` when it is scrolled out of view
    pub fn position(&self, first_visible: usize, index: usize) -> Option<(u16, u16)> {
        if index < first_visible || index - first_visible >= self.n_visible {
            return None;
        }
        Some(self.column_pos(index - first_visible))
    }

    /// Adjust `first_visible` so `focus` lies inside the window
    pub fn scroll_to(&self, first_visible: usize, focus: usize) -> usize {
        if focus < first_visible {
            focus
        } else if self.n_visible > 0 && focus >= first_visible + self.n_visible {
            focus + 1 - self.n_visible
        } else {
            first_visible
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_screen_spreads_columns() {
        let l = Layout::compute(80, 24, 4);
        assert_eq!(l.n_visible, 4);
        assert_eq!(l.extra_space, 13.0);
        assert_eq!(l.column_pos(0).0, 3);
        assert_eq!(l.column_pos(1).0, 25);
        assert_eq!(l.column_pos(3).0, 69);
        // last column still ends inside the frame
        assert!(l.column_pos(3).0 + 9 < 80);
    }

    #[test]
    fn crowded_screen_keeps_a_gap() {
        let l = Layout::compute(80, 24, 10);
        assert_eq!(l.n_visible, 7);
        assert_eq!(l.extra_space, 2.0);
        assert_eq!(l.column_pos(6).0, 3 + 66);
    }

    #[test]
    fn single_channel_has_no_spread() {
        let l = Layout::compute(80, 24, 1);
        assert_eq!(l.n_visible, 1);
        assert_eq!(l.extra_space, 0.0);
    }

    #[test]
    fn no_channels() {
        let l = Layout::compute(80, 24, 0);
        assert_eq!(l.n_visible, 0);
        assert_eq!(l.position(0, 0), None);
        assert_eq!(l.scroll_to(0, 0), 0);
    }

    #[test]
    fn tiny_screen_is_clamped_to_minimum() {
        let l = Layout::compute(5, 5, 8);
        assert_eq!((l.max_x, l.max_y), (MIN_WIDTH, MIN_HEIGHT));
        assert_eq!(l.n_visible, 2);
        assert_eq!(l.bar_height, 10);
    }

    #[test]
    fn bar_grows_with_height() {
        assert_eq!(Layout::compute(80, 19, 2).bar_height, 10);
        assert_eq!(Layout::compute(80, 20, 2).bar_height, 10);
        assert_eq!(Layout::compute(80, 24, 2).bar_height, 12);
        assert_eq!(Layout::compute(80, 50, 2).bar_height, 25);
    }

    #[test]
    fn label_row_sits_above_the_bottom_frame() {
        let l = Layout::compute(80, 19, 2);
        assert_eq!(l.column_pos(0).1, 17);
        let l = Layout::compute(80, 24, 2);
        assert_eq!(l.column_pos(0).1, 2 + 12 + 6 + 1);
    }

    #[test]
    fn window_follows_focus() {
        let l = Layout::compute(80, 24, 10);
        assert_eq!(l.scroll_to(0, 3), 0);
        assert_eq!(l.scroll_to(0, 7), 1);
        assert_eq!(l.scroll_to(0, 9), 3);
        assert_eq!(l.scroll_to(3, 1), 1);
        assert_eq!(l.position(3, 2), None);
        assert_eq!(l.position(3, 3), Some(l.column_pos(0)));
        assert_eq!(l.position(3, 10), None);
    }
}
