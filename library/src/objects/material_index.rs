use bytemuck::{Pod, Zeroable};
use derive_more::Display;

/// Position of a material inside the material buffer, as seen by the shader.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Default, Display, Eq, PartialEq, Hash, Pod, Zeroable)]
pub struct MaterialIndex(pub u32);

impl From<usize> for MaterialIndex {
    #[must_use]
    fn from(value: usize) -> Self {
        MaterialIndex(value as u32)
    }
}
