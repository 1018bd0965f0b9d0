use crate::config::RESERVED_BINDING_SLOT;
use derive_more::Display;

#[derive(Copy, Clone, Debug, Display, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct BindingSlot(pub u32);

/// Hands out shader binding slots; a slot is never handed out twice.
pub struct BindingSlotAllocator {
    last_allocated_slot: u32,
}

impl BindingSlotAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self { last_allocated_slot: RESERVED_BINDING_SLOT }
    }

    #[must_use]
    pub fn next(&mut self) -> BindingSlot {
        self.last_allocated_slot += 1;
        BindingSlot(self.last_allocated_slot)
    }

    #[must_use]
    pub fn allocated_count(&self) -> u32 {
        self.last_allocated_slot - RESERVED_BINDING_SLOT
    }
}

impl Default for BindingSlotAllocator {
    fn default() -> Self {
        Self::new()
    }
}
