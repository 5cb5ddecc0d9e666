use crate::core::math::transform::TransformFactory;
use crate::io::config::{CameraConfig, Config, ObjectConfig};
use crate::procedural::parametric::{
    double_teardrop, seashell, teardrop, torus, uv_sphere,
};
use crate::procedural::primitives::{DiscColoring, cube, disc};
use crate::procedural::subdivision::{octahedron, subdivide};
use crate::scene::camera::Camera;
use crate::scene::context::RenderContext;
use crate::scene::light::Light;
use crate::scene::mesh::Mesh;
use crate::scene::scene_object::SceneObject;
use log::{debug, info};
use nalgebra::{Matrix4, Point3, Vector3};

/// Builds the light list from config (used at init and before each frame set).
pub fn build_lights_from_config(config: &Config) -> Vec<Light> {
    let mut lights = Vec::new();

    for l in &config.lights {
        let color = Vector3::from(l.color);
        match l.r#type.as_str() {
            "directional" => {
                if let Some(dir) = l.direction {
                    lights.push(Light::new_directional(
                        Vector3::from(dir).normalize(),
                        color,
                        l.intensity,
                    ));
                }
            }
            "point" => {
                if let Some(pos) = l.position {
                    let mut light = Light::new_point(Point3::from(pos), color, l.intensity);
                    if let Light::Point {
                        ref mut attenuation,
                        ..
                    } = light
                        && let Some(a) = l.attenuation
                    {
                        *attenuation = (a[0], a[1], a[2]);
                    }
                    lights.push(light);
                }
            }
            _ => {}
        }
    }

    lights
}

pub fn build_camera(camera: &CameraConfig, aspect_ratio: f32) -> Camera {
    let position = Point3::from(camera.position);
    let target = Point3::from(camera.target);
    let up = Vector3::from(camera.up);

    if camera.projection == "orthographic" {
        Camera::new_orthographic(
            position,
            target,
            up,
            camera.ortho_height,
            aspect_ratio,
            camera.near,
            camera.far,
        )
    } else {
        Camera::new_perspective(
            position,
            target,
            up,
            camera.fov.to_radians(),
            aspect_ratio,
            camera.near,
            camera.far,
        )
    }
}

/// Generates the mesh for one configured object.
///
/// `depth_override` substitutes the subdivision depth without touching the
/// config (used by the depth sweep).
pub fn build_object_mesh(object: &ObjectConfig, depth_override: Option<u32>) -> Mesh {
    match object.kind.as_str() {
        "subdivided-sphere" => {
            let depth = depth_override.unwrap_or(object.depth);
            let tri = subdivide(&octahedron(), depth);
            debug!(
                "subdivided sphere: depth {}, {} vertices, {} faces",
                depth,
                tri.vertices.len(),
                tri.faces.len()
            );
            Mesh::from_tri_mesh(&tri)
        }
        "uv-sphere" => uv_sphere(
            object.radius,
            object.u_steps,
            object.v_steps,
            object
                .color
                .map(Vector3::from)
                .unwrap_or(Vector3::new(1.0, 0.1, 0.1)),
        ),
        "torus" => torus(
            object.major_radius,
            object.minor_radius,
            object.u_steps,
            object.v_steps,
        ),
        "teardrop" => teardrop(
            object.teardrop_scale,
            object.teardrop_constant,
            object.u_steps,
            object.v_steps,
        ),
        "double-teardrop" => double_teardrop(
            object.teardrop_scale,
            object.teardrop_constant,
            object.u_steps,
            object.v_steps,
        ),
        "seashell" => seashell(object.u_steps, object.v_steps),
        "cube" => cube(
            object
                .color
                .map(Vector3::from)
                .unwrap_or(Vector3::new(0.1, 0.1, 1.0)),
        ),
        "disc" => disc(
            object.radius,
            object.segments,
            if object.random_colors {
                DiscColoring::RandomGreens
            } else {
                DiscColoring::Uniform(
                    object
                        .color
                        .map(Vector3::from)
                        .unwrap_or(Vector3::new(1.0, 1.0, 1.0)),
                )
            },
        ),
        // Config validation rejects unknown kinds before this point.
        other => unreachable!("unvalidated object kind '{other}'"),
    }
}

pub fn object_transform(object: &ObjectConfig) -> Matrix4<f32> {
    let translation = TransformFactory::translation(&Vector3::from(object.position));
    let rotation = TransformFactory::rotation_x(object.rotation[0].to_radians())
        * TransformFactory::rotation_y(object.rotation[1].to_radians())
        * TransformFactory::rotation_z(object.rotation[2].to_radians());
    let scale = TransformFactory::scaling(&Vector3::from(object.scale));
    translation * rotation * scale
}

/// Initial resource construction. Returns a RenderContext owning everything
/// a frame needs.
pub fn init_scene(config: &Config) -> RenderContext {
    let aspect_ratio = config.render.width as f32 / config.render.height as f32;
    let camera = build_camera(&config.camera, aspect_ratio);
    let lights = build_lights_from_config(config);

    let scene_objects: Vec<SceneObject> = config
        .objects
        .iter()
        .map(|object| SceneObject::new(build_object_mesh(object, None), object_transform(object)))
        .collect();

    info!("Scene initialized with {} objects.", scene_objects.len());

    RenderContext {
        camera,
        lights,
        scene_objects,
    }
}

/// Regenerates every refined-sphere object at the given depth, dropping the
/// previous meshes as they are replaced.
pub fn rebuild_subdivided_spheres(context: &mut RenderContext, config: &Config, depth: u32) {
    for (object_config, scene_object) in config.objects.iter().zip(&mut context.scene_objects) {
        if object_config.kind == "subdivided-sphere" {
            scene_object.replace_mesh(build_object_mesh(object_config, Some(depth)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::Config;

    #[test]
    fn default_scene_builds_three_objects() {
        let config = Config::default();
        let context = init_scene(&config);

        assert_eq!(context.scene_objects.len(), 3);
        assert_eq!(context.lights.len(), 1);

        // Depth 3 refined sphere: 8 * 4^3 faces.
        assert_eq!(context.scene_objects[0].mesh.triangle_count(), 8 * 64);
    }

    #[test]
    fn depth_rebuild_replaces_geometry() {
        let config = Config::default();
        let mut context = init_scene(&config);

        rebuild_subdivided_spheres(&mut context, &config, 0);
        assert_eq!(context.scene_objects[0].mesh.triangle_count(), 8);

        rebuild_subdivided_spheres(&mut context, &config, 2);
        assert_eq!(context.scene_objects[0].mesh.triangle_count(), 128);

        // Objects of other kinds keep their meshes.
        assert_eq!(context.scene_objects[2].mesh.triangle_count(), 12);
    }

    #[test]
    fn object_transform_places_translation_last() {
        let mut object = Config::default().objects[1].clone();
        object.position = [2.0, 0.0, 0.0];
        object.scale = [3.0, 3.0, 3.0];

        let m = object_transform(&object);
        let p = m * nalgebra::Point3::new(1.0, 0.0, 0.0).to_homogeneous();
        // Scale first (3.0), then translate (+2.0).
        assert!((p.x - 5.0).abs() < 1e-5);
    }
}
