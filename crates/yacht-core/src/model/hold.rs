use crate::model::dice::DICE_COUNT;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Dice positions excluded from the next roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct HoldMask {
    held: [bool; DICE_COUNT],
}

impl HoldMask {
    pub const fn none() -> Self {
        Self {
            held: [false; DICE_COUNT],
        }
    }

    pub const fn all() -> Self {
        Self {
            held: [true; DICE_COUNT],
        }
    }

    pub const fn from_flags(held: [bool; DICE_COUNT]) -> Self {
        Self { held }
    }

    pub fn from_fn<F: FnMut(usize) -> bool>(f: F) -> Self {
        Self {
            held: core::array::from_fn(f),
        }
    }

    pub fn is_held(&self, position: usize) -> bool {
        self.held.get(position).copied().unwrap_or(false)
    }

    pub fn set(&mut self, position: usize, held: bool) {
        if let Some(slot) = self.held.get_mut(position) {
            *slot = held;
        }
    }

    pub fn toggle(&mut self, position: usize) {
        if let Some(slot) = self.held.get_mut(position) {
            *slot = !*slot;
        }
    }

    pub fn clear(&mut self) {
        self.held = [false; DICE_COUNT];
    }

    pub fn is_all(&self) -> bool {
        self.held.iter().all(|h| *h)
    }

    pub fn is_none(&self) -> bool {
        self.held.iter().all(|h| !*h)
    }

    pub fn held_count(&self) -> usize {
        self.held.iter().filter(|h| **h).count()
    }

    pub const fn flags(&self) -> &[bool; DICE_COUNT] {
        &self.held
    }
}

impl fmt::Display for HoldMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for held in self.held {
            f.write_str(if held { "H" } else { "." })?;
        }
        Ok(())
    }
}
