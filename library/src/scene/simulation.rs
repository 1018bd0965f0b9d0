use crate::geometry::alias::Point;
use std::time::Duration;

/// New position for the sphere at `index` of the spheres staging sequence.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OriginUpdate {
    pub index: usize,
    pub origin: Point,
}

/// Whatever moves spheres between ticks: a physics step, an animation, a test script.
pub trait Simulation {
    #[must_use]
    fn advance(&mut self, delta: Duration) -> Vec<OriginUpdate>;
}

const GRAVITY: f32 = 9.81;
const RESTITUTION: f32 = 0.8;

/// Drops one sphere straight down and bounces it off a horizontal floor.
pub struct BouncingSphere {
    index: usize,
    position: Point,
    vertical_velocity: f32,
    floor_height: f32,
}

impl BouncingSphere {
    #[must_use]
    pub fn new(index: usize, position: Point, floor_height: f32, launch_speed: f32) -> Self {
        assert!(position.y >= floor_height, "sphere must start above the floor");
        Self { index, position, vertical_velocity: launch_speed, floor_height }
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }
}

impl Simulation for BouncingSphere {
    fn advance(&mut self, delta: Duration) -> Vec<OriginUpdate> {
        let seconds = delta.as_secs_f32();
        if seconds == 0.0 {
            return Vec::new();
        }

        self.vertical_velocity -= GRAVITY * seconds;
        self.position.y += self.vertical_velocity * seconds;

        if self.position.y < self.floor_height {
            self.position.y = self.floor_height + (self.floor_height - self.position.y) * RESTITUTION;
            self.vertical_velocity = -self.vertical_velocity * RESTITUTION;
        }

        vec![OriginUpdate { index: self.index, origin: self.position }]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use more_asserts::{assert_ge, assert_gt, assert_lt};

    const TICK: Duration = Duration::from_millis(16);

    #[test]
    fn test_zero_delta_moves_nothing() {
        let mut system_under_test = BouncingSphere::new(0, Point::new(0.0, 1.0, 0.0), 0.0, 0.0);
        assert!(system_under_test.advance(Duration::ZERO).is_empty());
        assert_eq!(system_under_test.position(), Point::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut system_under_test = BouncingSphere::new(2, Point::new(1.0, 5.0, -1.0), 0.0, 0.0);

        let updates = system_under_test.advance(TICK);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].index, 2);
        assert_lt!(updates[0].origin.y, 5.0);
        assert_eq!(updates[0].origin.x, 1.0);
        assert_eq!(updates[0].origin.z, -1.0);
    }

    #[test]
    fn test_launch_speed_lifts_first() {
        let mut system_under_test = BouncingSphere::new(0, Point::new(0.0, 0.0, 0.0), 0.0, 5.0);

        let updates = system_under_test.advance(TICK);

        assert_gt!(updates[0].origin.y, 0.0);
    }

    #[test]
    fn test_never_sinks_below_floor() {
        const FLOOR: f32 = -1.0;
        let mut system_under_test = BouncingSphere::new(0, Point::new(0.0, 2.0, 0.0), FLOOR, 0.0);

        let mut bounced = false;
        let mut previous_height = system_under_test.position().y;
        for _ in 0..1000 {
            let height = system_under_test.advance(TICK)[0].origin.y;
            assert_ge!(height, FLOOR);
            bounced |= height > previous_height;
            previous_height = height;
        }
        assert!(bounced);
    }

    #[test]
    #[should_panic(expected = "sphere must start above the floor")]
    fn test_start_below_floor() {
        let _system_under_test = BouncingSphere::new(0, Point::new(0.0, -2.0, 0.0), 0.0, 0.0);
    }
}
