pub mod material;
pub mod material_index;
pub mod primitive_header;
pub mod primitive_kind;
pub mod sphere;
pub mod triangle;
