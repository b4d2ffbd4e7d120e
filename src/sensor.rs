//! Distance sensors: three rays rigidly mounted on the car body.
//!
//! Each tick a sensor recomputes its world pose from the car's center and
//! heading, casts a bounded ray against every boundary segment, and keeps the
//! closest hit. The latest reading is cached so downstream consumers (the
//! controller and any renderer) see one consistent value per pose.

use crate::config::CarConfig;
use crate::geometry::{
    ray_segment_distance, rotate_for_ray_direction, rotate_offset_for_position, Segment, Vec2,
};

/// Number of sensors mounted on a car.
pub const SENSOR_COUNT: usize = 3;

/// Mount angles relative to the heading: front-left, front, front-right.
const RELATIVE_ANGLES: [f32; SENSOR_COUNT] = [45.0, 0.0, -45.0];

/// One directional range sensor.
#[derive(Clone, Debug)]
pub struct Sensor {
    /// Mount point relative to the car center, body frame.
    offset: Vec2,
    /// Ray angle relative to the car heading, degrees.
    relative_angle: f32,
    max_ray_length: f32,
    /// World position after the last update.
    position: Vec2,
    /// World ray angle after the last update, degrees.
    ray_angle: f32,
    /// Closest boundary hit after the last update, if any.
    reading: Option<f32>,
}

impl Sensor {
    fn new(offset: Vec2, relative_angle: f32, max_ray_length: f32) -> Self {
        Self {
            offset,
            relative_angle,
            max_ray_length,
            position: Vec2::default(),
            ray_angle: relative_angle,
            reading: None,
        }
    }

    /// Recompute the world pose and cast against the boundary.
    fn update(&mut self, center: Vec2, heading_deg: f32, boundary: &[Segment]) {
        self.position = rotate_offset_for_position(self.offset, heading_deg).add(center);
        self.ray_angle = rotate_for_ray_direction(heading_deg, self.relative_angle);

        let mut closest: Option<f32> = None;
        for segment in boundary {
            if let Some(distance) =
                ray_segment_distance(self.position, self.ray_angle, self.max_ray_length, segment)
            {
                if closest.map_or(true, |best| distance < best) {
                    closest = Some(distance);
                }
            }
        }
        self.reading = closest;
    }

    /// Latest distance reading, `None` when nothing is in range.
    #[inline]
    pub fn reading(&self) -> Option<f32> {
        self.reading
    }

    /// World position after the last update.
    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// World ray angle in degrees after the last update.
    #[inline]
    pub fn ray_angle(&self) -> f32 {
        self.ray_angle
    }
}

/// The three sensors of one car.
#[derive(Clone, Debug)]
pub struct SensorArray {
    sensors: [Sensor; SENSOR_COUNT],
}

impl SensorArray {
    /// Mount sensors at the front corners and nose of the car body.
    pub fn new(config: &CarConfig) -> Self {
        let half_len = config.body_length / 2.0;
        let half_wid = config.body_width / 2.0;
        let offsets = [
            Vec2::new(half_len, -half_wid),
            Vec2::new(half_len, 0.0),
            Vec2::new(half_len, half_wid),
        ];

        let sensors = std::array::from_fn(|i| {
            Sensor::new(offsets[i], RELATIVE_ANGLES[i], config.max_ray_length)
        });
        Self { sensors }
    }

    /// Re-evaluate every sensor for the given car pose.
    pub fn update(&mut self, center: Vec2, heading_deg: f32, boundary: &[Segment]) {
        for sensor in &mut self.sensors {
            sensor.update(center, heading_deg, boundary);
        }
    }

    /// Latest readings in mount order (front-left, front, front-right).
    #[inline]
    pub fn readings(&self) -> [Option<f32>; SENSOR_COUNT] {
        [
            self.sensors[0].reading(),
            self.sensors[1].reading(),
            self.sensors[2].reading(),
        ]
    }

    #[inline]
    pub fn sensors(&self) -> &[Sensor; SENSOR_COUNT] {
        &self.sensors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarConfig;

    fn nose_sensor(max_ray_length: f32) -> Sensor {
        Sensor::new(Vec2::new(0.0, 0.0), 0.0, max_ray_length)
    }

    #[test]
    fn test_closest_segment_wins() {
        let mut sensor = nose_sensor(1000.0);
        let boundary = [
            Segment::new(Vec2::new(200.0, -50.0), Vec2::new(200.0, 50.0)),
            Segment::new(Vec2::new(80.0, -50.0), Vec2::new(80.0, 50.0)),
            Segment::new(Vec2::new(500.0, -50.0), Vec2::new(500.0, 50.0)),
        ];
        sensor.update(Vec2::new(0.0, 0.0), 0.0, &boundary);
        assert_eq!(sensor.reading(), Some(80.0));
    }

    #[test]
    fn test_no_reading_when_out_of_range() {
        let mut sensor = nose_sensor(100.0);
        let boundary = [Segment::new(Vec2::new(150.0, -50.0), Vec2::new(150.0, 50.0))];
        sensor.update(Vec2::new(0.0, 0.0), 0.0, &boundary);
        assert_eq!(sensor.reading(), None);
    }

    #[test]
    fn test_mount_pose_tracks_heading() {
        let config = CarConfig::default();
        let mut array = SensorArray::new(&config);
        array.update(Vec2::new(100.0, 100.0), 90.0, &[]);

        // At heading 90 the nose mount (15, 0) rotates to (0, -15): above the
        // center in screen space.
        let nose = &array.sensors()[1];
        assert!((nose.position().x - 100.0).abs() < 1e-3);
        assert!((nose.position().y - 85.0).abs() < 1e-3);
        assert_eq!(nose.ray_angle(), 90.0);

        // Side rays fan out around the heading.
        assert_eq!(array.sensors()[0].ray_angle(), 135.0);
        assert_eq!(array.sensors()[2].ray_angle(), 45.0);
    }

    #[test]
    fn test_readings_order_matches_mounts() {
        let config = CarConfig::default();
        let mut array = SensorArray::new(&config);
        // A wall ahead: only rays with a forward component can hit it.
        let boundary = [Segment::new(Vec2::new(300.0, -500.0), Vec2::new(300.0, 500.0))];
        array.update(Vec2::new(0.0, 0.0), 0.0, &boundary);

        let readings = array.readings();
        assert!(readings.iter().all(|r| r.is_some()));
        // The straight-ahead ray reports the shortest distance.
        assert!(readings[1].unwrap() < readings[0].unwrap());
        assert!(readings[1].unwrap() < readings[2].unwrap());
    }
}
