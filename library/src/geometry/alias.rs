use cgmath::Point3;

pub type Point = Point3<f32>;
