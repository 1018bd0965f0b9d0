use crate::config::{MATERIAL_BLOCK_PREFIX, MATERIALS_CAPACITY};
use crate::serialization::pod_vector::PodVector;
use crate::serialization::uniform_block_element::UniformBlockElement;
use bytemuck::{Pod, Zeroable};
use palette::Srgb;
use std::mem::offset_of;

/// Phong-style surface description, packed for a `StaticMaterialBuffer*` block.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, Pod, Zeroable)]
pub struct Material {
    diffuse: PodVector,
    specular: PodVector,
    shininess: f32,
    _padding: [f32; 3],
}

const _: () = assert!(size_of::<Material>() == 48);

impl Material {
    #[must_use]
    pub fn new(diffuse: Srgb, specular: Srgb, shininess: f32) -> Self {
        assert!(shininess >= 0.0, "shininess must be non-negative");
        Self {
            diffuse: diffuse.into(),
            specular: specular.into(),
            shininess,
            _padding: [0.0; 3],
        }
    }

    #[must_use]
    pub fn diffuse(&self) -> Srgb {
        Srgb::new(self.diffuse.x, self.diffuse.y, self.diffuse.z)
    }

    #[must_use]
    pub fn specular(&self) -> Srgb {
        Srgb::new(self.specular.x, self.specular.y, self.specular.z)
    }

    #[must_use]
    pub fn shininess(&self) -> f32 {
        self.shininess
    }
}

impl UniformBlockElement for Material {
    const BLOCK_PREFIX: &'static str = MATERIAL_BLOCK_PREFIX;
    const CAPACITY: usize = MATERIALS_CAPACITY;
    const FIELD_OFFSETS: &'static [(&'static str, usize)] = &[
        ("diffuse", offset_of!(Material, diffuse)),
        ("specular", offset_of!(Material, specular)),
        ("shininess", offset_of!(Material, shininess)),
    ];
}
