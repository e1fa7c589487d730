//! Specialized collection types

/// Result of pushing into a [`BoundedVec`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum PushOutcome {
    /// The item was stored
    Stored,
    /// The list was full and the item was discarded
    Dropped,
}

impl PushOutcome {
    /// Whether the item was discarded
    pub const fn is_dropped(self) -> bool {
        matches!(self, Self::Dropped)
    }
}

/// Fixed-capacity list that never grows past `N`
///
/// Pushing into a full list discards the new item and reports
/// [`PushOutcome::Dropped`] instead of panicking or reallocating.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundedVec<T, const N: usize> {
    items: Vec<T>,
}

impl<T, const N: usize> BoundedVec<T, N> {
    /// Maximum number of items
    pub const CAPACITY: usize = N;

    /// Create an empty list
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(N),
        }
    }

    /// Append an item if there is room
    pub fn push(&mut self, item: T) -> PushOutcome {
        if self.items.len() < N {
            self.items.push(item);
            PushOutcome::Stored
        } else {
            PushOutcome::Dropped
        }
    }

    /// Number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another push would be dropped
    pub fn is_full(&self) -> bool {
        self.items.len() >= N
    }

    /// Remove all items
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate over the stored items
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Iterate mutably over the stored items
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    /// Stored items as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Push every item from an iterator, returning how many were dropped
    pub fn extend_bounded<I: IntoIterator<Item = T>>(&mut self, iter: I) -> usize {
        iter.into_iter()
            .map(|item| self.push(item))
            .filter(|outcome| outcome.is_dropped())
            .count()
    }
}

impl<T, const N: usize> Default for BoundedVec<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a BoundedVec<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut list: BoundedVec<u8, 2> = BoundedVec::new();
        assert_eq!(list.push(1), PushOutcome::Stored);
        assert_eq!(list.push(2), PushOutcome::Stored);
        assert!(list.is_full());
        assert_eq!(list.push(3), PushOutcome::Dropped);
        assert_eq!(list.as_slice(), &[1, 2]);
    }

    #[test]
    fn test_extend_counts_dropped() {
        let mut list: BoundedVec<u32, 3> = BoundedVec::default();
        let dropped = list.extend_bounded(0..5);
        assert_eq!(dropped, 2);
        assert_eq!(list.len(), 3);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.extend_bounded(0..1), 0);
    }
}
