//! Compile-time configuration of the static scene buffers.
//!
//! Capacities must agree with the array bounds declared in the shader blocks;
//! a disagreement is reported as a layout mismatch when the buffer is created.

/// Element count every static buffer gets unless its element type overrides it.
pub const DEFAULT_STATIC_BUFFER_CAPACITY: usize = 64;

pub const MATERIALS_CAPACITY: usize = DEFAULT_STATIC_BUFFER_CAPACITY;
pub const SPHERES_CAPACITY: usize = DEFAULT_STATIC_BUFFER_CAPACITY;
pub const TRIANGLES_CAPACITY: usize = 128;

pub const WORLD_BLOCK_PREFIX: &str = "StaticWorldBuffer";
pub const MATERIAL_BLOCK_PREFIX: &str = "StaticMaterialBuffer";
pub const CURRENT_SIZE_PREFIX: &str = "currentSize";

/// All static buffers are rebound into this group.
pub const STATIC_BUFFERS_BIND_GROUP: u32 = 0;

/// Binding zero of the static group belongs to the camera/frame uniforms.
pub const RESERVED_BINDING_SLOT: u32 = 0;

/// Count scalars are `u32`, but a uniform binding is allocated in 16-byte quanta.
pub const SIZE_SCALAR_BUFFER_BYTES: u64 = 16;
