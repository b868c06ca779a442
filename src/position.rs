//! Position-indexed storage.
//!
//! [`PositionIndex`] is a `Vec` whose items each carry their own index.
//! After every mutation, for every item, `item.position()` equals its slot
//! in the sequence: appends stamp the current length, removals shift every
//! later item down by one.

use crate::error::{Error, Result};

/// An item that knows its own position.
pub trait Positioned {
    fn position(&self) -> usize;
    fn set_position(&mut self, position: usize);
}

/// Ordered storage keeping each item's position field in sync with its slot.
#[derive(Debug)]
pub struct PositionIndex<T> {
    items: Vec<T>,
}

impl<T> Default for PositionIndex<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Positioned> PositionIndex<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append `item`, stamping it with the current length. Returns that
    /// position.
    pub fn push(&mut self, mut item: T) -> usize {
        let position = self.items.len();
        item.set_position(position);
        self.items.push(item);
        position
    }

    /// Append every item in order.
    pub fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.push(item);
        }
    }

    fn check(&self, position: usize) -> Result<()> {
        if position < self.items.len() {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                position,
                len: self.items.len(),
            })
        }
    }

    /// Remove and return the item at `position`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn remove(&mut self, position: usize) -> Result<T> {
        self.check(position)?;
        let removed = self.items.remove(position);
        for (slot, item) in self.items.iter_mut().enumerate().skip(position) {
            item.set_position(slot);
        }
        Ok(removed)
    }

    /// Put `item` at `position` and return the item it replaced.
    ///
    /// Every index in `[0, len)` is valid, including the last.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn replace(&mut self, position: usize, mut item: T) -> Result<T> {
        self.check(position)?;
        item.set_position(position);
        Ok(std::mem::replace(&mut self.items[position], item))
    }

    /// Remove the first item matching `pred`, scanning `[0, len)`.
    pub fn remove_where<F>(&mut self, mut pred: F) -> Option<T>
    where
        F: FnMut(&T) -> bool,
    {
        let position = self.items.iter().position(|item| pred(item))?;
        self.remove(position).ok()
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn get(&self, position: usize) -> Result<&T> {
        self.check(position)?;
        Ok(&self.items[position])
    }

    /// # Errors
    ///
    /// [`Error::OutOfRange`] unless `position < len`.
    pub fn get_mut(&mut self, position: usize) -> Result<&mut T> {
        self.check(position)?;
        Ok(&mut self.items[position])
    }

    /// Items in position order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Mutable items in position order.
    ///
    /// Callers must not rewrite position fields through this.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Whether every item's position matches its slot.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.items
            .iter()
            .enumerate()
            .all(|(slot, item)| item.position() == slot)
    }
}

impl<'a, T: Positioned> IntoIterator for &'a PositionIndex<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Positioned> FromIterator<T> for PositionIndex<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
