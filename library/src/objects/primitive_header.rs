use crate::geometry::alias::Point;
use crate::objects::material_index::MaterialIndex;
use crate::serialization::pod_vector::PodVector;
use bytemuck::{Pod, Zeroable};
use std::mem::offset_of;

/// Leading fields shared by every primitive record.
///
/// Each variant embeds the header as its first member, so shader code can read
/// material and origin without knowing the concrete primitive.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, Pod, Zeroable)]
pub struct PrimitiveHeader {
    material_index: MaterialIndex,
    _padding: [u32; 3],
    origin: PodVector,
}

const _: () = assert!(size_of::<PrimitiveHeader>() == 32);

impl PrimitiveHeader {
    pub(crate) const MATERIAL_INDEX_OFFSET: usize = offset_of!(PrimitiveHeader, material_index);
    pub(crate) const ORIGIN_OFFSET: usize = offset_of!(PrimitiveHeader, origin);

    #[must_use]
    pub fn new(material_index: MaterialIndex, origin: Point) -> Self {
        Self {
            material_index,
            _padding: [0; 3],
            origin: origin.into(),
        }
    }

    #[must_use]
    pub fn material_index(&self) -> MaterialIndex {
        self.material_index
    }

    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin.to_point()
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin.into();
    }
}
