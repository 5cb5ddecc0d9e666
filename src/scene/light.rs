use crate::core::math::transform::TransformFactory;
use nalgebra::{Point3, Vector3};

/// Represents a light source in the scene.
#[derive(Debug, Clone)]
pub enum Light {
    /// A light source that is infinitely far away (e.g., Sun).
    /// Rays are parallel.
    Directional {
        direction: Vector3<f32>,
        color: Vector3<f32>,
        intensity: f32,
    },
    /// A light source at a specific position that radiates in all directions.
    Point {
        position: Point3<f32>,
        color: Vector3<f32>,
        intensity: f32,
        /// Attenuation coefficients: (constant, linear, quadratic)
        attenuation: (f32, f32, f32),
    },
}

impl Light {
    /// Creates a simple directional light.
    pub fn new_directional(direction: Vector3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self::Directional {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// Creates a simple point light.
    pub fn new_point(position: Point3<f32>, color: Vector3<f32>, intensity: f32) -> Self {
        Self::Point {
            position,
            color,
            intensity,
            attenuation: (1.0, 0.09, 0.032),
        }
    }

    /// Calculates the direction vector FROM the surface point TO the light source.
    pub fn get_direction_to_light(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        match self {
            // Direction is defined as the direction the light travels.
            Light::Directional { direction, .. } => -direction,
            Light::Point { position, .. } => (position - surface_point).normalize(),
        }
    }

    /// Calculates the light intensity arriving at the surface point.
    /// Handles attenuation for point lights.
    pub fn get_intensity(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        match self {
            Light::Directional {
                color, intensity, ..
            } => color * *intensity,

            Light::Point {
                position,
                color,
                intensity,
                attenuation,
            } => {
                let distance = (position - surface_point).norm();
                let (c, l, q) = attenuation;
                let attenuation_factor = 1.0 / (c + l * distance + q * distance * distance);
                color * *intensity * attenuation_factor
            }
        }
    }

    /// Rotates a point light around the world Y axis; directional lights are
    /// unaffected. Used to orbit fill lights across animation frames.
    pub fn orbit_around_y(&mut self, angle_rad: f32) {
        if let Light::Point { position, .. } = self {
            let rotated =
                TransformFactory::rotation_y(angle_rad) * position.to_homogeneous();
            *position = Point3::from_homogeneous(rotated).unwrap_or(*position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_attenuates_with_distance() {
        let light = Light::new_point(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 1.0, 1.0), 2.0);

        let near = light.get_intensity(&Point3::new(0.0, 4.0, 0.0));
        let far = light.get_intensity(&Point3::new(0.0, -5.0, 0.0));
        assert!(near.x > far.x);
    }

    #[test]
    fn directional_light_ignores_position() {
        let light =
            Light::new_directional(Vector3::new(0.0, -1.0, 0.0), Vector3::new(1.0, 1.0, 1.0), 1.0);

        let a = light.get_intensity(&Point3::origin());
        let b = light.get_intensity(&Point3::new(100.0, 0.0, 0.0));
        assert!((a - b).norm() < 1e-6);

        let to_light = light.get_direction_to_light(&Point3::origin());
        assert!((to_light - Vector3::y()).norm() < 1e-6);
    }

    #[test]
    fn orbiting_keeps_height_and_radius() {
        let mut light =
            Light::new_point(Point3::new(3.0, 1.5, 0.0), Vector3::new(1.0, 0.0, 0.0), 1.0);

        light.orbit_around_y(std::f32::consts::FRAC_PI_2);

        let Light::Point { position, .. } = light else {
            panic!("light changed variant");
        };
        assert!((position.y - 1.5).abs() < 1e-5);
        assert!((position.coords.xz().norm() - 3.0).abs() < 1e-5);
        assert!(position.x.abs() < 1e-5);
    }
}
