use crate::geometry::alias::Point;
use crate::objects::material::Material;
use crate::objects::material_index::MaterialIndex;
use crate::objects::sphere::Sphere;
use crate::objects::triangle::Triangle;
use cgmath::EuclideanSpace;
use palette::Srgb;

const DEMO_SPHERE_RADIUS: f32 = 1.0;
const DEMO_FLOOR_HALF_EXTENT: f32 = 6.0;
const DEMO_BACK_WALL_DISTANCE: f32 = 8.0;

/// Host-side list of everything the static buffers get filled with at startup.
#[derive(Clone, Debug, Default)]
pub struct SceneDescription {
    materials: Vec<Material>,
    spheres: Vec<Sphere>,
    triangles: Vec<Triangle>,
}

impl SceneDescription {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn add_material(&mut self, material: Material) -> MaterialIndex {
        self.materials.push(material);
        MaterialIndex::from(self.materials.len() - 1)
    }

    pub fn add_sphere(&mut self, sphere: Sphere) -> usize {
        self.check_material(sphere.header().material_index());
        self.spheres.push(sphere);
        self.spheres.len() - 1
    }

    pub fn add_triangle(&mut self, triangle: Triangle) -> usize {
        self.check_material(triangle.header().material_index());
        self.triangles.push(triangle);
        self.triangles.len() - 1
    }

    #[must_use]
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    #[must_use]
    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    #[must_use]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// A magenta sphere resting on a grey floor in front of a grey wall.
    #[must_use]
    pub fn demo() -> Self {
        let mut scene = Self::new();

        let magenta = scene.add_material(Material::new(Srgb::new(1.0, 0.0, 1.0), Srgb::new(1.0, 1.0, 1.0), 32.0));
        let grey = scene.add_material(Material::new(Srgb::new(0.6, 0.6, 0.6), Srgb::new(0.1, 0.1, 0.1), 4.0));

        scene.add_sphere(Sphere::new(magenta, Point::origin(), DEMO_SPHERE_RADIUS));

        let floor = -DEMO_SPHERE_RADIUS;
        let extent = DEMO_FLOOR_HALF_EXTENT;
        let near_left = Point::new(-extent, floor, extent);
        let near_right = Point::new(extent, floor, extent);
        let far_left = Point::new(-extent, floor, -extent);
        let far_right = Point::new(extent, floor, -extent);
        scene.add_triangle(Triangle::new(grey, near_left, near_right, far_right));
        scene.add_triangle(Triangle::new(grey, near_left, far_right, far_left));

        let wall = -DEMO_BACK_WALL_DISTANCE;
        let top = floor + 2.0 * extent;
        scene.add_triangle(Triangle::new(grey, Point::new(-extent, floor, wall), Point::new(extent, floor, wall), Point::new(extent, top, wall)));
        scene.add_triangle(Triangle::new(grey, Point::new(-extent, floor, wall), Point::new(extent, top, wall), Point::new(-extent, top, wall)));

        scene
    }

    fn check_material(&self, index: MaterialIndex) {
        assert!((index.0 as usize) < self.materials.len(), "material {index} is not registered");
    }
}
