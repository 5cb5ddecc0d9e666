use crate::scene::camera::Camera;
use crate::scene::light::Light;
use crate::scene::scene_object::SceneObject;

/// Holds all scene resources required for rendering.
///
/// Geometry, lights and the camera are owned here rather than living in
/// globals; replacing an object's mesh drops the old buffers in the same
/// step that installs the new ones.
pub struct RenderContext {
    pub camera: Camera,
    pub lights: Vec<Light>,
    pub scene_objects: Vec<SceneObject>,
}
