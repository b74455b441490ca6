//! Navigation cursor over the rows of a spectral map.

/// Single-step direction.
///
/// `Up` moves toward higher row indices, matching the 2D map's y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Current row over `[0, row_count)`.
///
/// Inactive (no current row) until a map with at least one row is loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationCursor {
    current: Option<usize>,
    row_count: usize,
}

impl NavigationCursor {
    /// Rebind the cursor to a new row range and move to row 0.
    pub fn reset(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.current = (row_count > 0).then_some(0);
    }

    /// Current row, or `None` when no map is loaded.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Number of rows the cursor ranges over.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Jump to `row`. Out-of-range rows leave the cursor where it is.
    ///
    /// Returns `true` if the cursor now points at `row`.
    pub fn move_to(&mut self, row: usize) -> bool {
        if self.current.is_none() || row >= self.row_count {
            return false;
        }
        self.current = Some(row);
        true
    }

    /// Jump to the row under a data-space y coordinate (rounded to nearest).
    pub fn move_to_coordinate(&mut self, y: f64) -> bool {
        match row_from_coordinate(y, self.row_count) {
            Some(row) => self.move_to(row),
            None => false,
        }
    }

    /// Move one row in `direction` without wrapping.
    ///
    /// Returns `true` if the cursor moved.
    pub fn step(&mut self, direction: Direction) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let next = match direction {
            Direction::Up if current + 1 < self.row_count => current + 1,
            Direction::Down if current > 0 => current - 1,
            _ => return false,
        };
        self.current = Some(next);
        true
    }
}

/// Round a plot y coordinate to a row index inside `[0, row_count)`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn row_from_coordinate(y: f64, row_count: usize) -> Option<usize> {
    let rounded = y.round();
    if !rounded.is_finite() || rounded < 0.0 || rounded >= row_count as f64 {
        return None;
    }
    Some(rounded as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_cursor_ignores_moves() {
        let mut cursor = NavigationCursor::default();
        assert_eq!(cursor.current(), None);
        assert!(!cursor.move_to(0));
        assert!(!cursor.step(Direction::Up));
        assert!(!cursor.step(Direction::Down));
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_reset_moves_to_zero() {
        let mut cursor = NavigationCursor::default();
        cursor.reset(5);
        assert!(cursor.move_to(3));
        cursor.reset(2);
        assert_eq!(cursor.current(), Some(0));
        cursor.reset(0);
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_move_to_out_of_range_keeps_position() {
        let mut cursor = NavigationCursor::default();
        cursor.reset(4);
        assert!(cursor.move_to(2));
        assert!(!cursor.move_to(4));
        assert!(!cursor.move_to(usize::MAX));
        assert_eq!(cursor.current(), Some(2));
    }

    #[test]
    fn test_step_never_leaves_range() {
        for row_count in 1..8 {
            for start in 0..row_count {
                let mut cursor = NavigationCursor::default();
                cursor.reset(row_count);
                assert!(cursor.move_to(start));
                for _ in 0..row_count {
                    cursor.step(Direction::Up);
                    assert!(cursor.current().unwrap() < row_count);
                }
                assert_eq!(cursor.current(), Some(row_count - 1));
                for _ in 0..row_count {
                    cursor.step(Direction::Down);
                }
                assert_eq!(cursor.current(), Some(0));
            }
        }
    }

    #[test]
    fn test_step_reports_movement() {
        let mut cursor = NavigationCursor::default();
        cursor.reset(2);
        assert!(!cursor.step(Direction::Down));
        assert!(cursor.step(Direction::Up));
        assert!(!cursor.step(Direction::Up));
    }

    #[test]
    fn test_coordinate_rounding() {
        assert_eq!(row_from_coordinate(2.4, 5), Some(2));
        assert_eq!(row_from_coordinate(2.6, 5), Some(3));
        assert_eq!(row_from_coordinate(-0.4, 5), Some(0));
        assert_eq!(row_from_coordinate(-0.6, 5), None);
        assert_eq!(row_from_coordinate(4.6, 5), None);
        assert_eq!(row_from_coordinate(f64::NAN, 5), None);

        let mut cursor = NavigationCursor::default();
        cursor.reset(5);
        assert!(cursor.move_to_coordinate(3.2));
        assert_eq!(cursor.current(), Some(3));
        assert!(!cursor.move_to_coordinate(7.0));
        assert_eq!(cursor.current(), Some(3));
    }
}
