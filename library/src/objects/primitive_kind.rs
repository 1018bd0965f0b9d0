use strum_macros::{Display, EnumCount, EnumIter};

pub const MATERIALS_CATEGORY: &str = "Materials";

/// Every primitive variant the shader understands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
pub enum PrimitiveKind {
    Sphere,
    Triangle,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn category(self) -> &'static str {
        match self {
            PrimitiveKind::Sphere => "Spheres",
            PrimitiveKind::Triangle => "Triangles",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::sphere::Sphere;
    use crate::objects::triangle::Triangle;
    use crate::serialization::uniform_block_element::UniformBlockElement;
    use rstest::rstest;
    use std::collections::HashSet;
    use strum::{EnumCount, IntoEnumIterator};

    #[rstest]
    #[case(PrimitiveKind::Sphere, "StaticWorldBufferSpheres")]
    #[case(PrimitiveKind::Triangle, "StaticWorldBufferTriangles")]
    fn test_world_block_name(#[case] kind: PrimitiveKind, #[case] expected_name: &str) {
        let actual = match kind {
            PrimitiveKind::Sphere => Sphere::block_name(kind.category()),
            PrimitiveKind::Triangle => Triangle::block_name(kind.category()),
        };
        assert_eq!(actual, expected_name);
    }

    #[test]
    fn test_categories_are_distinct() {
        let mut categories: HashSet<&str> = PrimitiveKind::iter().map(|kind| kind.category()).collect();
        categories.insert(MATERIALS_CATEGORY);
        assert_eq!(categories.len(), PrimitiveKind::COUNT + 1);
    }
}
