use std::collections::HashMap;

use chrono::NaiveDate;
use rand::seq::SliceRandom;

use crate::data::Catalog;
use crate::models::{Direction, Item, Mode, ReviewRecord};

/// The session's working set: an ordered selection from the catalog plus a
/// cyclic cursor. Rebuilt from scratch whenever the chapter range, mode or
/// shuffle toggle changes; never persisted.
pub struct DeckSession {
    items: Vec<Item>,
    cursor: usize,
    mode: Mode,
}

impl DeckSession {
    pub fn empty(mode: Mode) -> Self {
        Self {
            items: Vec::new(),
            cursor: 0,
            mode,
        }
    }

    /// Selects and orders the working set.
    ///
    /// The caller guarantees `chapter_start <= chapter_end`; an inverted
    /// range simply selects nothing. Review mode keeps only items with an
    /// existing record due on/before `today` and always shuffles, so review
    /// order never encodes position memory. Other modes keep catalog order
    /// unless `shuffled` asks for a uniform permutation.
    pub fn build(
        catalog: &Catalog,
        records: &HashMap<String, ReviewRecord>,
        chapter_start: u32,
        chapter_end: u32,
        mode: Mode,
        shuffled: bool,
        today: NaiveDate,
    ) -> Self {
        let mut items: Vec<Item> = catalog
            .items()
            .iter()
            .filter(|item| chapter_start <= item.chapter && item.chapter <= chapter_end)
            .cloned()
            .collect();

        match mode {
            Mode::Review => {
                for id in records.keys() {
                    if catalog.get(id).is_none() {
                        log::warn!("review record {id} has no catalog entry, skipping");
                    }
                }
                items.retain(|item| {
                    records
                        .get(&item.id)
                        .is_some_and(|record| record.is_due(today))
                });
                items.shuffle(&mut rand::thread_rng());
            }
            Mode::Flashcard | Mode::Quiz => {
                if shuffled {
                    items.shuffle(&mut rand::thread_rng());
                }
            }
        }

        Self {
            items,
            cursor: 0,
            mode,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current(&self) -> Option<&Item> {
        self.items.get(self.cursor)
    }

    /// 1-based (position, total) pair for the progress counter.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            None
        } else {
            Some((self.cursor + 1, self.items.len()))
        }
    }

    /// Cyclic cursor move. No-op on an empty set.
    pub fn advance(&mut self, direction: Direction) {
        let n = self.items.len();
        if n == 0 {
            return;
        }
        self.cursor = match direction {
            Direction::Next => (self.cursor + 1) % n,
            Direction::Prev => (self.cursor + n - 1) % n,
        };
    }

    /// Removes the item at the cursor (review mode: a rated item is done for
    /// the session). The cursor stays put so the next item slides into
    /// place, wrapping to 0 when the tail was removed.
    pub fn remove_current(&mut self) -> Option<Item> {
        if self.items.is_empty() {
            return None;
        }
        let removed = self.items.remove(self.cursor);
        if self.cursor >= self.items.len() {
            self.cursor = 0;
        }
        Some(removed)
    }
}
