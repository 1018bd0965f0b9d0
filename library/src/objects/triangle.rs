use crate::config::{TRIANGLES_CAPACITY, WORLD_BLOCK_PREFIX};
use crate::geometry::alias::Point;
use crate::objects::material_index::MaterialIndex;
use crate::objects::primitive_header::PrimitiveHeader;
use crate::serialization::pod_vector::PodVector;
use crate::serialization::uniform_block_element::UniformBlockElement;
use bytemuck::{Pod, Zeroable};
use std::mem::offset_of;

/// Vertex `a` lives in the header origin; `b` and `c` follow it.
#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, Pod, Zeroable)]
pub struct Triangle {
    header: PrimitiveHeader,
    b: PodVector,
    c: PodVector,
}

const _: () = assert!(size_of::<Triangle>() == 64);

impl Triangle {
    #[must_use]
    pub fn new(material_index: MaterialIndex, a: Point, b: Point, c: Point) -> Self {
        Self {
            header: PrimitiveHeader::new(material_index, a),
            b: b.into(),
            c: c.into(),
        }
    }

    #[must_use]
    pub fn header(&self) -> &PrimitiveHeader {
        &self.header
    }

    #[must_use]
    pub fn vertices(&self) -> [Point; 3] {
        [self.header.origin(), self.b.to_point(), self.c.to_point()]
    }
}

impl UniformBlockElement for Triangle {
    const BLOCK_PREFIX: &'static str = WORLD_BLOCK_PREFIX;
    const CAPACITY: usize = TRIANGLES_CAPACITY;
    const FIELD_OFFSETS: &'static [(&'static str, usize)] = &[
        ("header", offset_of!(Triangle, header)),
        ("header.material_index", offset_of!(Triangle, header) + PrimitiveHeader::MATERIAL_INDEX_OFFSET),
        ("header.origin", offset_of!(Triangle, header) + PrimitiveHeader::ORIGIN_OFFSET),
        ("b", offset_of!(Triangle, b)),
        ("c", offset_of!(Triangle, c)),
    ];
}
