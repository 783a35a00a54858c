/// Cursor over the song list.
///
/// Holds `0 <= cursor < total` with `total >= 1`. Moves never wrap and moves
/// past either end are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    cursor: usize,
    total: usize,
}

impl Pager {
    /// Pager at the first row, `None` when there are no rows
    pub fn new(total: usize) -> Option<Self> {
        Self::starting_at(total, 0)
    }

    /// Pager at `cursor`, clamped to the last row
    pub fn starting_at(total: usize, cursor: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }
        Some(Self {
            cursor: cursor.min(total - 1),
            total,
        })
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor == self.total - 1
    }

    /// Move forward one row. Returns whether the cursor moved.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move back one row. Returns whether the cursor moved.
    pub fn retreat(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Jump to `index`; out-of-range targets are ignored
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.total || index == self.cursor {
            return false;
        }
        self.cursor = index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pager_is_rejected() {
        assert_eq!(Pager::new(0), None);
        assert_eq!(Pager::starting_at(0, 3), None);
    }

    #[test]
    fn test_advance_and_retreat() {
        let mut pager = Pager::new(3).unwrap();

        assert!(pager.advance());
        assert!(pager.advance());
        assert_eq!(pager.cursor(), 2);
        assert!(pager.retreat());
        assert_eq!(pager.cursor(), 1);
    }

    #[test]
    fn test_bounds_are_absorbed() {
        let mut pager = Pager::new(2).unwrap();

        assert!(!pager.retreat());
        assert_eq!(pager.cursor(), 0);

        pager.advance();
        assert!(!pager.advance());
        assert!(!pager.advance());
        assert_eq!(pager.cursor(), 1);
    }

    #[test]
    fn test_single_row_never_moves() {
        let mut pager = Pager::new(1).unwrap();

        assert!(pager.is_first() && pager.is_last());
        assert!(!pager.advance());
        assert!(!pager.retreat());
        assert_eq!(pager.cursor(), 0);
    }

    #[test]
    fn test_starting_at_clamps() {
        assert_eq!(Pager::starting_at(4, 2).unwrap().cursor(), 2);
        assert_eq!(Pager::starting_at(4, 40).unwrap().cursor(), 3);
    }

    #[test]
    fn test_jump_to() {
        let mut pager = Pager::new(5).unwrap();

        assert!(pager.jump_to(4));
        assert_eq!(pager.cursor(), 4);
        assert!(!pager.jump_to(5));
        assert!(!pager.jump_to(4));
        assert_eq!(pager.cursor(), 4);
    }
}
