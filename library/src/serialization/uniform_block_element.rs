use crate::config::DEFAULT_STATIC_BUFFER_CAPACITY;
use bytemuck::Pod;

pub(crate) const UNIFORM_SLOT_SIZE_BYTES: usize = 16;

/// A record the shader reads directly out of a uniform block array.
///
/// Implementors are `#[repr(C)]` and padded so that every field starts on a
/// 16-byte boundary and the whole record is a multiple of 16 bytes.
pub trait UniformBlockElement: Pod {
    /// Prepended to the category name to get the shader block name.
    const BLOCK_PREFIX: &'static str;

    const CAPACITY: usize = DEFAULT_STATIC_BUFFER_CAPACITY;

    /// Shader member paths paired with their host byte offsets from the record start.
    /// Members of nested structs use dotted paths such as `header.origin`.
    const FIELD_OFFSETS: &'static [(&'static str, usize)];

    #[must_use]
    fn block_name(category: &str) -> String {
        format!("{}{}", Self::BLOCK_PREFIX, category)
    }
}

#[must_use]
pub(crate) const fn is_slot_aligned(offset_or_size: usize) -> bool {
    0 == offset_or_size % UNIFORM_SLOT_SIZE_BYTES
}
