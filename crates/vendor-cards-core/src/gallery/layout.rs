use crate::{Error, Result};
use std::num::NonZeroUsize;
use vendor_cards_types::{DEFAULT_ROW_SIZE, GalleryViewModel};

/// Row grouping used when presenting a gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    row_size: NonZeroUsize,
}

/// One step of a laid-out gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutToken<'a> {
    Card {
        index: usize,
        item: &'a GalleryViewModel,
    },
    /// Clears the current row
    RowBreak,
}

impl RowLayout {
    #[must_use]
    pub fn new(row_size: NonZeroUsize) -> Self {
        Self { row_size }
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] when `row_size` is zero.
    pub fn try_from_size(row_size: usize) -> Result<Self> {
        NonZeroUsize::new(row_size)
            .map(Self::new)
            .ok_or_else(|| Error::Config("rowSize must be at least 1".to_string()))
    }

    #[must_use]
    pub fn row_size(&self) -> usize {
        self.row_size.get()
    }

    /// Cards interleaved with a row break after every `row_size`-th card.
    /// A full last row is followed by a break as well.
    #[must_use]
    pub fn tokens<'a>(&self, items: &'a [GalleryViewModel]) -> Vec<LayoutToken<'a>> {
        let row_size = self.row_size.get();
        let mut tokens = Vec::with_capacity(items.len() + items.len() / row_size);
        for (index, item) in items.iter().enumerate() {
            tokens.push(LayoutToken::Card { index, item });
            if (index + 1) % row_size == 0 {
                tokens.push(LayoutToken::RowBreak);
            }
        }
        tokens
    }

    #[must_use]
    pub fn rows<'a>(&self, items: &'a [GalleryViewModel]) -> Vec<&'a [GalleryViewModel]> {
        items.chunks(self.row_size.get()).collect()
    }
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            row_size: NonZeroUsize::new(DEFAULT_ROW_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}
