//! Keyboard traversal order for a select.
//!
//! Keyboard focus does not walk the options in display order. The selected
//! option comes first (it is the trigger, the first tab stop), followed by
//! every other option in its original relative order.

/// Navigable order of option indexes, selected option first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOrder {
    indexes: Vec<usize>,
}

impl NavigationOrder {
    /// Build the order for `len` options with `selected` chosen.
    #[must_use]
    pub fn new(len: usize, selected: usize) -> Self {
        debug_assert!(selected < len, "selected index {selected} out of range {len}");
        let mut indexes = Vec::with_capacity(len);
        indexes.push(selected);
        indexes.extend((0..len).filter(|&i| i != selected));
        Self { indexes }
    }

    /// Number of navigable positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Check if there is nothing to navigate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Original option index at a navigable position.
    #[must_use]
    pub fn original_index(&self, position: usize) -> Option<usize> {
        self.indexes.get(position).copied()
    }

    /// Navigable position of an original option index.
    #[must_use]
    pub fn position_of(&self, original: usize) -> Option<usize> {
        let selected = *self.indexes.first()?;
        if original >= self.indexes.len() {
            None
        } else if original == selected {
            Some(0)
        } else if original < selected {
            Some(original + 1)
        } else {
            Some(original)
        }
    }

    /// Original indexes in navigable order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }
}

/// Next position, wrapping past the end to 0.
#[must_use]
pub const fn step_forward(position: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        (position + 1) % len
    }
}

/// Previous position, wrapping from 0 to the last position.
#[must_use]
pub const fn step_backward(position: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if position == 0 {
        len - 1
    } else {
        position - 1
    }
}
