use crate::procedural::subdivision::MAX_SUBDIVISION_DEPTH;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub toon: ToonConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub objects: Vec<ObjectConfig>,
}

impl Default for Config {
    fn default() -> Self {
        // The built-in scene: a refined sphere in the middle, flanked by a
        // red lat/long sphere and a blue cube.
        Self {
            render: RenderConfig::default(),
            camera: CameraConfig::default(),
            toon: ToonConfig::default(),
            animation: AnimationConfig::default(),
            lights: vec![LightConfig {
                r#type: "directional".to_string(),
                direction: Some([-1.0, -1.0, -1.0]),
                color: [1.0, 1.0, 1.0],
                intensity: 0.8,
                position: None,
                attenuation: None,
            }],
            objects: vec![
                ObjectConfig {
                    kind: "subdivided-sphere".to_string(),
                    ..ObjectConfig::with_kind_defaults()
                },
                ObjectConfig {
                    kind: "uv-sphere".to_string(),
                    position: [-3.0, 0.0, 0.0],
                    scale: [1.5, 1.5, 1.5],
                    color: Some([1.0, 0.1, 0.1]),
                    ..ObjectConfig::with_kind_defaults()
                },
                ObjectConfig {
                    kind: "cube".to_string(),
                    position: [3.0, 0.0, 0.0],
                    color: Some([0.1, 0.1, 1.0]),
                    ..ObjectConfig::with_kind_defaults()
                },
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    // --- Output & Quality ---
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    /// Output file; a timestamped name is generated when omitted.
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_exposure")]
    pub exposure: f32,

    // --- Shading ---
    #[serde(default = "default_shader")]
    pub shader: String, // "unlit", "lambert", "toon", "depth"
    #[serde(default = "default_ambient")]
    pub ambient_light: [f32; 3],

    // --- Background ---
    pub background_color: Option<[f32; 3]>,
    pub background_gradient_top: Option<[f32; 3]>,
    pub background_gradient_bottom: Option<[f32; 3]>,

    // --- Pipeline & Debug ---
    #[serde(default = "default_cull_mode")]
    pub cull_mode: String, // "back", "front", "none"
    #[serde(default = "default_false")]
    pub wireframe: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            output: None,
            samples: default_samples(),
            exposure: default_exposure(),
            shader: default_shader(),
            ambient_light: default_ambient(),
            background_color: None,
            background_gradient_top: Some([0.16, 0.16, 0.2]),
            background_gradient_bottom: Some([0.05, 0.05, 0.08]),
            cull_mode: default_cull_mode(),
            wireframe: false,
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_samples() -> usize {
    2
}
fn default_exposure() -> f32 {
    1.0
}
fn default_shader() -> String {
    "lambert".to_string()
}
fn default_ambient() -> [f32; 3] {
    [0.4, 0.4, 0.4]
}
fn default_cull_mode() -> String {
    "back".to_string()
}
fn default_false() -> bool {
    false
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_cam_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_cam_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_projection")]
    pub projection: String,
    #[serde(default = "default_ortho_height")]
    pub ortho_height: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,

    // --- Orbit control ---
    #[serde(default = "default_rotate_step")]
    pub rotate_step: f32,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f32,
    #[serde(default = "default_min_radius")]
    pub min_radius: f32,
    #[serde(default = "default_max_radius")]
    pub max_radius: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_cam_position(),
            target: [0.0, 0.0, 0.0],
            up: default_cam_up(),
            fov: default_fov(),
            projection: default_projection(),
            ortho_height: default_ortho_height(),
            near: default_near(),
            far: default_far(),
            rotate_step: default_rotate_step(),
            zoom_step: default_zoom_step(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
        }
    }
}

fn default_cam_position() -> [f32; 3] {
    [0.0, 0.0, 10.0]
}
fn default_cam_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}
fn default_fov() -> f32 {
    75.0
}
fn default_projection() -> String {
    "perspective".to_string()
}
fn default_ortho_height() -> f32 {
    10.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}
fn default_rotate_step() -> f32 {
    0.02
}
fn default_zoom_step() -> f32 {
    0.5
}
fn default_min_radius() -> f32 {
    3.0
}
fn default_max_radius() -> f32 {
    50.0
}

/// Parameters for the cel-shading bands.
#[derive(Debug, Deserialize)]
pub struct ToonConfig {
    #[serde(default = "default_toon_steps")]
    pub diffuse_steps: u32,
    #[serde(default = "default_toon_steps")]
    pub specular_steps: u32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
    #[serde(default = "default_toon_ambient")]
    pub ambient: f32,
}

impl Default for ToonConfig {
    fn default() -> Self {
        Self {
            diffuse_steps: default_toon_steps(),
            specular_steps: default_toon_steps(),
            shininess: default_shininess(),
            ambient: default_toon_ambient(),
        }
    }
}

fn default_toon_steps() -> u32 {
    3
}
fn default_shininess() -> f32 {
    32.0
}
fn default_toon_ambient() -> f32 {
    0.15
}

#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    /// "none" (single frame), "turntable", or "depth-sweep".
    #[serde(default = "default_anim_mode")]
    pub mode: String,
    #[serde(default = "default_frames")]
    pub frames: u32,
    /// Camera azimuth advance per turntable frame, in degrees.
    #[serde(default = "default_orbit_step")]
    pub orbit_step_deg: f32,
    /// Whether point lights circle the scene during a turntable.
    #[serde(default = "default_true")]
    pub orbit_lights: bool,
    /// Point-light azimuth advance per frame, in degrees.
    #[serde(default = "default_light_orbit_step")]
    pub light_orbit_step_deg: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            mode: default_anim_mode(),
            frames: default_frames(),
            orbit_step_deg: default_orbit_step(),
            orbit_lights: true,
            light_orbit_step_deg: default_light_orbit_step(),
        }
    }
}

fn default_anim_mode() -> String {
    "none".to_string()
}
fn default_frames() -> u32 {
    24
}
fn default_orbit_step() -> f32 {
    15.0
}
fn default_light_orbit_step() -> f32 {
    9.0
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    pub r#type: String,
    pub position: Option<[f32; 3]>,
    pub direction: Option<[f32; 3]>,
    pub color: [f32; 3],
    pub intensity: f32,
    pub attenuation: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectConfig {
    /// "subdivided-sphere", "uv-sphere", "torus", "teardrop",
    /// "double-teardrop", "seashell", "cube", or "disc".
    pub kind: String,

    // --- Transform ---
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: [f32; 3],

    // --- Geometry parameters (per kind, unused ones ignored) ---
    #[serde(default = "default_depth")]
    pub depth: u32,
    #[serde(default = "default_steps")]
    pub u_steps: usize,
    #[serde(default = "default_steps")]
    pub v_steps: usize,
    #[serde(default = "default_segments")]
    pub segments: usize,
    #[serde(default = "default_major_radius")]
    pub major_radius: f32,
    #[serde(default = "default_minor_radius")]
    pub minor_radius: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_teardrop_scale")]
    pub teardrop_scale: f32,
    #[serde(default = "default_teardrop_constant")]
    pub teardrop_constant: f32,

    // --- Coloring ---
    pub color: Option<[f32; 3]>,
    #[serde(default = "default_false")]
    pub random_colors: bool,
}

impl ObjectConfig {
    /// Baseline used by `Config::default` to stamp out objects.
    fn with_kind_defaults() -> Self {
        Self {
            kind: String::new(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: default_scale(),
            depth: default_depth(),
            u_steps: default_steps(),
            v_steps: default_steps(),
            segments: default_segments(),
            major_radius: default_major_radius(),
            minor_radius: default_minor_radius(),
            radius: default_radius(),
            teardrop_scale: default_teardrop_scale(),
            teardrop_constant: default_teardrop_constant(),
            color: None,
            random_colors: false,
        }
    }
}

fn default_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}
fn default_depth() -> u32 {
    3
}
fn default_steps() -> usize {
    50
}
fn default_segments() -> usize {
    30
}
fn default_major_radius() -> f32 {
    0.4
}
fn default_minor_radius() -> f32 {
    0.2
}
fn default_radius() -> f32 {
    1.0
}
fn default_teardrop_scale() -> f32 {
    0.5
}
fn default_teardrop_constant() -> f32 {
    1.7
}

const KNOWN_KINDS: [&str; 8] = [
    "subdivided-sphere",
    "uv-sphere",
    "torus",
    "teardrop",
    "double-teardrop",
    "seashell",
    "cube",
    "disc",
];
const KNOWN_SHADERS: [&str; 4] = ["unlit", "lambert", "toon", "depth"];
const KNOWN_CULL_MODES: [&str; 3] = ["back", "front", "none"];
const KNOWN_ANIM_MODES: [&str; 3] = ["none", "turntable", "depth-sweep"];

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read config file: {}", e))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Rejects invalid user input before any scene resources are built.
    pub fn validate(&self) -> Result<(), String> {
        if self.render.width == 0 || self.render.height == 0 {
            return Err("render.width and render.height must be positive".to_string());
        }
        if self.render.samples == 0 {
            return Err("render.samples must be at least 1".to_string());
        }
        if !KNOWN_SHADERS.contains(&self.render.shader.as_str()) {
            return Err(format!(
                "unknown shader '{}' (expected one of {:?})",
                self.render.shader, KNOWN_SHADERS
            ));
        }
        if !KNOWN_CULL_MODES.contains(&self.render.cull_mode.as_str()) {
            return Err(format!("unknown cull mode '{}'", self.render.cull_mode));
        }
        if !KNOWN_ANIM_MODES.contains(&self.animation.mode.as_str()) {
            return Err(format!("unknown animation mode '{}'", self.animation.mode));
        }
        if self.animation.frames == 0 {
            return Err("animation.frames must be at least 1".to_string());
        }

        for (i, object) in self.objects.iter().enumerate() {
            if !KNOWN_KINDS.contains(&object.kind.as_str()) {
                return Err(format!("objects[{i}]: unknown kind '{}'", object.kind));
            }
            if object.depth > MAX_SUBDIVISION_DEPTH {
                return Err(format!(
                    "objects[{i}]: subdivision depth {} exceeds maximum {}",
                    object.depth, MAX_SUBDIVISION_DEPTH
                ));
            }
            if object.u_steps < 2 || object.v_steps < 2 {
                return Err(format!("objects[{i}]: u_steps and v_steps must be >= 2"));
            }
            if object.segments < 3 {
                return Err(format!("objects[{i}]: segments must be >= 3"));
            }
        }

        Ok(())
    }
}
