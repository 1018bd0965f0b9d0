use crate::config::{CURRENT_SIZE_PREFIX, SIZE_SCALAR_BUFFER_BYTES};
use crate::gpu::binding_slot_allocator::{BindingSlot, BindingSlotAllocator};
use crate::gpu::gpu_memory::GpuMemory;
use crate::gpu::layout_verification::{report, verify_element_layout, verify_size_scalar, LayoutMismatch};
use crate::gpu::shader_program::{ShaderInterfaceError, ShaderProgram};
use crate::serialization::uniform_block_element::UniformBlockElement;
use log::debug;
use std::ops::Range;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StaticBufferError {
    #[error("block '{block}' holds {len} elements, capacity is {capacity}")]
    CapacityExceeded {
        block: String,
        len: usize,
        capacity: usize,
    },
    #[error(transparent)]
    Interface(#[from] ShaderInterfaceError),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FlushStatus {
    elements_written: usize,
    size_written: bool,
}

impl FlushStatus {
    #[must_use]
    pub fn elements_written(&self) -> usize {
        self.elements_written
    }

    #[must_use]
    pub fn size_written(&self) -> bool {
        self.size_written
    }

    #[must_use]
    pub fn updated(&self) -> bool {
        self.elements_written > 0 || self.size_written
    }
}

struct SizeTracker<Buffer> {
    slot: BindingSlot,
    buffer: Buffer,
    uploaded: Option<u32>,
}

/// Fixed-capacity device array of `T` plus the host staging sequence that feeds it.
///
/// The device storage is sized once at construction and never reallocated, so
/// bind groups built over it stay valid for the whole buffer lifetime. The
/// staging sequence may temporarily grow past capacity; the next flush then
/// fails without touching the device.
pub struct TypedStaticBuffer<T: UniformBlockElement, M: GpuMemory> {
    block: String,
    slot: BindingSlot,
    capacity: usize,
    staging: Vec<T>,
    buffer: M::Buffer,
    size_tracker: Option<SizeTracker<M::Buffer>>,
    dirty: Option<Range<usize>>,
    layout_mismatches: Vec<LayoutMismatch>,
}

impl<T: UniformBlockElement, M: GpuMemory> TypedStaticBuffer<T, M> {
    pub fn new(
        program: &mut ShaderProgram,
        allocator: &mut BindingSlotAllocator,
        memory: &M,
        category: &str,
        track_size: bool,
    ) -> Result<Self, StaticBufferError> {
        Self::with_capacity(program, allocator, memory, category, track_size, T::CAPACITY)
    }

    pub fn with_capacity(
        program: &mut ShaderProgram,
        allocator: &mut BindingSlotAllocator,
        memory: &M,
        category: &str,
        track_size: bool,
        capacity: usize,
    ) -> Result<Self, StaticBufferError> {
        let block = T::block_name(category);
        let size_block = track_size.then(|| format!("{CURRENT_SIZE_PREFIX}{category}"));

        // both blocks are resolved before any slot is minted
        let mut layout_mismatches = verify_element_layout::<T>(&program.uniform_block(&block)?, capacity);
        if let Some(size_block) = &size_block {
            layout_mismatches.extend(verify_size_scalar(&program.uniform_block(size_block)?));
        }

        let slot = allocator.next();
        program.bind_uniform_block(&block, slot)?;

        let size_tracker = if let Some(size_block) = size_block {
            let size_slot = allocator.next();
            program.bind_uniform_block(&size_block, size_slot)?;
            Some(SizeTracker {
                slot: size_slot,
                buffer: memory.allocate_uniform_buffer(&size_block, SIZE_SCALAR_BUFFER_BYTES),
                uploaded: None,
            })
        } else {
            None
        };

        report(&layout_mismatches);

        let buffer = memory.allocate_uniform_buffer(&block, (capacity * size_of::<T>()) as u64);

        Ok(Self {
            block,
            slot,
            capacity,
            staging: Vec::with_capacity(capacity),
            buffer,
            size_tracker,
            dirty: None,
            layout_mismatches,
        })
    }

    pub fn append(&mut self, element: T) {
        self.staging.push(element);
        let index = self.staging.len() - 1;
        self.mark_dirty(index..index + 1);
    }

    /// Returns `false` and leaves staging untouched when `index` is past the end.
    pub fn update<Mutator: FnOnce(&mut T)>(&mut self, index: usize, mutate: Mutator) -> bool {
        let Some(element) = self.staging.get_mut(index) else {
            return false;
        };
        mutate(element);
        self.mark_dirty(index..index + 1);
        true
    }

    pub fn set(&mut self, index: usize, element: T) -> bool {
        self.update(index, |target| *target = element)
    }

    pub fn truncate(&mut self, len: usize) {
        self.staging.truncate(len);
    }

    pub fn clear(&mut self) {
        self.truncate(0);
    }

    pub fn mark_all_dirty(&mut self) {
        if !self.staging.is_empty() {
            self.mark_dirty(0..self.staging.len());
        }
    }

    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.staging
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.staging.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.staging.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn block(&self) -> &str {
        &self.block
    }

    #[must_use]
    pub fn slot(&self) -> BindingSlot {
        self.slot
    }

    #[must_use]
    pub fn size_slot(&self) -> Option<BindingSlot> {
        self.size_tracker.as_ref().map(|tracker| tracker.slot)
    }

    #[must_use]
    pub fn layout_mismatches(&self) -> &[LayoutMismatch] {
        &self.layout_mismatches
    }

    /// Device buffers paired with the slots their blocks are bound to.
    #[must_use]
    pub fn bindings(&self) -> Vec<(BindingSlot, &M::Buffer)> {
        let mut bindings = vec![(self.slot, &self.buffer)];
        if let Some(tracker) = &self.size_tracker {
            bindings.push((tracker.slot, &tracker.buffer));
        }
        bindings
    }

    pub fn flush(&mut self, memory: &M) -> Result<FlushStatus, StaticBufferError> {
        let len = self.staging.len();
        if len > self.capacity {
            return Err(StaticBufferError::CapacityExceeded { block: self.block.clone(), len, capacity: self.capacity });
        }

        let mut status = FlushStatus::default();

        if let Some(dirty) = self.dirty.take() {
            let live = dirty.start..dirty.end.min(len);
            if !live.is_empty() {
                let offset = (live.start * size_of::<T>()) as u64;
                memory.write_buffer(&self.buffer, offset, bytemuck::cast_slice(&self.staging[live.clone()]));
                status.elements_written = live.len();
            }
        }

        if let Some(tracker) = &mut self.size_tracker {
            let live_count = len as u32;
            if tracker.uploaded != Some(live_count) {
                memory.write_buffer(&tracker.buffer, 0, bytemuck::bytes_of(&live_count));
                tracker.uploaded = Some(live_count);
                status.size_written = true;
            }
        }

        if status.updated() {
            debug!("'{}' flushed: {} elements written, live count {}", self.block, status.elements_written, len);
        }

        Ok(status)
    }

    fn mark_dirty(&mut self, range: Range<usize>) {
        self.dirty = Some(match self.dirty.take() {
            Some(dirty) => dirty.start.min(range.start)..dirty.end.max(range.end),
            None => range,
        });
    }
}
