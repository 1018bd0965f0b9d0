pub mod binding_slot_allocator;
pub mod gpu_memory;
pub mod layout_verification;
pub mod shader_program;
pub mod typed_static_buffer;

pub(crate) mod bind_group_builder;
pub(crate) mod context;
pub(crate) mod headless_device;
pub(crate) mod resources;
