//! Cyclic gallery index.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carousel {
    len: usize,
    index: usize,
}

impl Carousel {
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Step to the next image, wrapping. No-op on an empty gallery.
    pub fn advance(&mut self) -> Option<usize> {
        self.advance_by(1)
    }

    /// Step `steps` images at once, landing where `steps` single advances would.
    pub fn advance_by(&mut self, steps: u64) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        let len = self.len as u64;
        self.index = ((self.index as u64 + steps % len) % len) as usize;
        Some(self.index)
    }

    /// Only galleries with more than one image rotate.
    pub fn is_cycling(&self) -> bool {
        self.len > 1
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
