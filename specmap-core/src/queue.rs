//! Ordered queue of rows pending export.

use crate::cursor::NavigationCursor;

/// Prompt shown before removing queue entries.
pub const DELETE_PROMPT: &str = "Delete these?";

/// Yes/no decision point consulted before destructive queue edits.
pub trait Confirm {
    /// Ask the user; `true` means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Row indices queued for export, in insertion order.
///
/// Duplicates are allowed. Entries are removed by queue position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionQueue {
    rows: Vec<usize>,
}

impl SelectionQueue {
    /// Append the cursor's current row. No-op if the cursor is inactive.
    pub fn add_current(&mut self, cursor: &NavigationCursor) -> bool {
        match cursor.current() {
            Some(row) => {
                self.rows.push(row);
                true
            }
            None => false,
        }
    }

    /// Replace the queue with every row `0..row_count`.
    pub fn add_all(&mut self, row_count: usize) {
        self.rows = (0..row_count).collect();
    }

    /// Remove the entries at `positions` after confirmation.
    ///
    /// Positions are removed highest first. Out-of-range and repeated
    /// positions are ignored. Returns the number of entries removed.
    pub fn delete<C: Confirm>(&mut self, positions: &[usize], mut confirm: C) -> usize {
        let mut positions: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&p| p < self.rows.len())
            .collect();
        if positions.is_empty() {
            return 0;
        }
        if !confirm.confirm(DELETE_PROMPT) {
            return 0;
        }
        positions.sort_unstable_by(|a, b| b.cmp(a));
        positions.dedup();
        for &position in &positions {
            self.rows.remove(position);
        }
        positions.len()
    }

    /// Queued rows in order.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Number of queued entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
