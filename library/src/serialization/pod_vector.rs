use crate::geometry::alias::Point;
use bytemuck::{Pod, Zeroable};
use palette::Srgb;
use std::fmt::{Display, Formatter};

pub(crate) const PAD_VALUE: f32 = 0.0;

/// Three components widened to a full 16-byte slot; `w` is padding.
#[repr(C)]
#[derive(PartialEq, Copy, Clone, Pod, Debug, Default, Zeroable)]
pub struct PodVector {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl PodVector {
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: PAD_VALUE }
    }

    #[must_use]
    pub const fn new_full(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w, }
    }

    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y, self.z)
    }
}

impl From<Point> for PodVector {
    #[must_use]
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y, point.z)
    }
}

impl From<Srgb> for PodVector {
    #[must_use]
    fn from(color: Srgb) -> Self {
        Self::new(color.red, color.green, color.blue)
    }
}

impl Display for PodVector {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_is_one_slot() {
        assert_eq!(size_of::<PodVector>(), 16);
    }

    #[test]
    fn test_from_point_pads_w() {
        let system_under_test = PodVector::from(Point::new(1.0, 2.0, 3.0));
        assert_eq!(system_under_test, PodVector::new_full(1.0, 2.0, 3.0, PAD_VALUE));
    }

    #[test]
    fn test_from_color() {
        let system_under_test = PodVector::from(Srgb::new(0.25, 0.5, 0.75));
        assert_eq!(system_under_test, PodVector::new(0.25, 0.5, 0.75));
    }

    #[test]
    fn test_to_point_drops_padding() {
        let system_under_test = PodVector::new_full(4.0, 5.0, 6.0, 7.0);
        assert_eq!(system_under_test.to_point(), Point::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_display() {
        let system_under_test = PodVector::new_full(1.0, 2.0, 3.0, 4.0);
        assert_eq!(system_under_test.to_string(), "(1, 2, 3, 4)");
    }
}
