//! Fixed-capacity pointer slots for the mouse and touch contacts
//!
//! Slot order approximates press order: a new contact takes the first free
//! slot, so the first finger down is usually the lowest touch slot. This
//! keeps code written against "pointer 0/1" working for mouse and touch.

use glam::IVec2;

use crate::error::{InputError, Result};

/// Platform finger identity
pub type FingerId = i64;

/// Slot reserved for the mouse
pub const MOUSE_POINTER: usize = 0;

/// Default slot count; must exceed the platform's simultaneous-touch limit
pub const DEFAULT_POINTER_CAPACITY: usize = 10;

/// One mouse or touch contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pointer {
    pub id: FingerId,
    /// Last known position in window pixels
    pub position: IVec2,
    /// Motion accumulated since the last frame advance
    pub delta: IVec2,
    pub used: bool,
}

/// Ordered pointer slots; slot 0 is the mouse and is always in use
#[derive(Debug, Clone)]
pub struct PointerTable {
    slots: Vec<Pointer>,
}

impl PointerTable {
    pub fn new(capacity: usize) -> Self {
        let mut slots = vec![Pointer::default(); capacity.max(1)];
        slots[MOUSE_POINTER].used = true;
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Pointer] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Pointer> {
        self.slots.get(index)
    }

    pub fn mouse(&self) -> &Pointer {
        &self.slots[MOUSE_POINTER]
    }

    pub fn mouse_mut(&mut self) -> &mut Pointer {
        &mut self.slots[MOUSE_POINTER]
    }

    /// Slot currently bound to `id`, if any
    pub fn find(&self, id: FingerId) -> Option<usize> {
        self.slots
            .iter()
            .enumerate()
            .skip(MOUSE_POINTER + 1)
            .find(|(_, slot)| slot.used && slot.id == id)
            .map(|(index, _)| index)
    }

    /// Slot bound to `id`, claiming the first free slot if it has none yet
    pub fn find_or_allocate(&mut self, id: FingerId) -> Result<usize> {
        if let Some(index) = self.find(id) {
            return Ok(index);
        }

        let capacity = self.slots.len();
        let (index, slot) = self
            .slots
            .iter_mut()
            .enumerate()
            .find(|(_, slot)| !slot.used)
            .ok_or(InputError::PointerSlotsExhausted { capacity })?;

        slot.id = id;
        slot.used = true;
        Ok(index)
    }

    /// Frees a touch slot
    ///
    /// The position is left in place so the final frame can still be read;
    /// the mouse slot is never released.
    pub fn release(&mut self, index: usize) {
        if index == MOUSE_POINTER {
            return;
        }
        if let Some(slot) = self.slots.get_mut(index) {
            slot.used = false;
        }
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Pointer> {
        self.slots.get_mut(index)
    }

    /// Zeroes every per-frame delta
    pub fn advance_frame(&mut self) {
        for slot in &mut self.slots {
            slot.delta = IVec2::ZERO;
        }
    }
}

impl Default for PointerTable {
    fn default() -> Self {
        Self::new(DEFAULT_POINTER_CAPACITY)
    }
}
