use crate::config::{SPHERES_CAPACITY, WORLD_BLOCK_PREFIX};
use crate::geometry::alias::Point;
use crate::objects::material_index::MaterialIndex;
use crate::objects::primitive_header::PrimitiveHeader;
use crate::serialization::uniform_block_element::UniformBlockElement;
use bytemuck::{Pod, Zeroable};
use std::mem::offset_of;

#[repr(C)]
#[derive(Copy, Clone, PartialEq, Debug, Pod, Zeroable)]
pub struct Sphere {
    header: PrimitiveHeader,
    // squared, so the shader's intersection test avoids a square root
    radius_squared: f32,
    _padding: [f32; 3],
}

const _: () = assert!(size_of::<Sphere>() == 48);

impl Sphere {
    #[must_use]
    pub fn new(material_index: MaterialIndex, center: Point, radius: f32) -> Self {
        assert!(radius >= 0.0, "radius must be non-negative");
        Sphere {
            header: PrimitiveHeader::new(material_index, center),
            radius_squared: radius * radius,
            _padding: [0.0; 3],
        }
    }

    #[must_use]
    pub fn header(&self) -> &PrimitiveHeader {
        &self.header
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.header.origin()
    }

    pub fn set_center(&mut self, center: Point) {
        self.header.set_origin(center);
    }

    #[must_use]
    pub fn radius_squared(&self) -> f32 {
        self.radius_squared
    }
}

impl UniformBlockElement for Sphere {
    const BLOCK_PREFIX: &'static str = WORLD_BLOCK_PREFIX;
    const CAPACITY: usize = SPHERES_CAPACITY;
    const FIELD_OFFSETS: &'static [(&'static str, usize)] = &[
        ("header", offset_of!(Sphere, header)),
        ("header.material_index", offset_of!(Sphere, header) + PrimitiveHeader::MATERIAL_INDEX_OFFSET),
        ("header.origin", offset_of!(Sphere, header) + PrimitiveHeader::ORIGIN_OFFSET),
        ("radius_squared", offset_of!(Sphere, radius_squared)),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::uniform_block_element::tests::assert_uniform_layout;
    use cgmath::EuclideanSpace;

    const DUMMY_MATERIAL: MaterialIndex = MaterialIndex(1);

    #[test]
    fn test_layout() {
        assert_uniform_layout::<Sphere>();
        assert_eq!(offset_of!(Sphere, header), 0);
        assert_eq!(offset_of!(Sphere, radius_squared), 32);
    }

    #[test]
    #[should_panic(expected = "radius must be non-negative")]
    fn test_new_with_negative_radius() {
        let _system_under_test = Sphere::new(DUMMY_MATERIAL, Point::origin(), -1.0);
    }

    #[test]
    fn test_new_with_zero_radius() {
        let system_under_test = Sphere::new(DUMMY_MATERIAL, Point::origin(), 0.0);
        assert_eq!(system_under_test.radius_squared(), 0.0);
    }

    #[test]
    fn test_new_with_valid_radius() {
        let expected_center = Point::new(3.0, 4.0, 5.0);
        let expected_material = MaterialIndex(8);

        let system_under_test = Sphere::new(expected_material, expected_center, 6.0);

        assert_eq!(system_under_test.radius_squared(), 36.0);
        assert_eq!(system_under_test.center(), expected_center);
        assert_eq!(system_under_test.header().material_index(), expected_material);
    }

    #[test]
    fn test_set_center_keeps_radius() {
        let mut system_under_test = Sphere::new(DUMMY_MATERIAL, Point::origin(), 2.0);

        system_under_test.set_center(Point::new(0.0, 7.0, 0.0));

        assert_eq!(system_under_test.center(), Point::new(0.0, 7.0, 0.0));
        assert_eq!(system_under_test.radius_squared(), 4.0);
    }

    #[test]
    fn test_packed_bytes() {
        let system_under_test = Sphere::new(MaterialIndex(6), Point::new(1.0, 2.0, 3.0), 4.0);

        let actual_words: &[u32] = bytemuck::cast_slice(bytemuck::bytes_of(&system_under_test));

        assert_eq!(actual_words.len(), 12);
        assert_eq!(actual_words[0], 6);
        assert_eq!(f32::from_bits(actual_words[4]), 1.0);
        assert_eq!(f32::from_bits(actual_words[5]), 2.0);
        assert_eq!(f32::from_bits(actual_words[6]), 3.0);
        assert_eq!(f32::from_bits(actual_words[8]), 16.0);
    }
}
