use crate::core::color::linear_to_srgb;
use crate::core::framebuffer::FrameBuffer;
use crate::io::config::Config;
use crate::pipeline::renderer::{ClearOptions, Renderer};
use crate::pipeline::shaders::depth::DepthShader;
use crate::pipeline::shaders::lambert::LambertShader;
use crate::pipeline::shaders::toon::ToonShader;
use crate::pipeline::shaders::unlit::UnlitShader;
use crate::scene::context::RenderContext;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Renders every scene object with the configured shader into the renderer's
/// framebuffer.
pub fn render_scene(config: &Config, context: &RenderContext, renderer: &mut Renderer) {
    let (gradient, color) = if let Some(c) = config.render.background_color {
        (None, Vector3::from(c))
    } else if let (Some(top), Some(bottom)) = (
        config.render.background_gradient_top,
        config.render.background_gradient_bottom,
    ) {
        (
            Some((Vector3::from(top), Vector3::from(bottom))),
            Vector3::zeros(),
        )
    } else {
        (None, Vector3::zeros())
    };

    renderer.clear_with_options(ClearOptions {
        color,
        gradient,
        depth: f32::INFINITY,
    });

    let view = context.camera.view_matrix();
    let projection = context.camera.projection_matrix();

    for object in &context.scene_objects {
        match config.render.shader.as_str() {
            "unlit" => {
                let shader = UnlitShader::new(projection * view * object.transform);
                renderer.draw_mesh(&object.mesh, &shader);
            }
            "depth" => {
                let shader = DepthShader::new(projection * view * object.transform);
                renderer.draw_mesh(&object.mesh, &shader);
            }
            "toon" => {
                let mut shader =
                    ToonShader::new(object.transform, view, projection, context.camera.position);
                shader.lights = context.lights.clone();
                shader.ambient = config.toon.ambient;
                shader.diffuse_steps = config.toon.diffuse_steps;
                shader.specular_steps = config.toon.specular_steps;
                shader.shininess = config.toon.shininess;
                renderer.draw_mesh(&object.mesh, &shader);
            }
            // "lambert" and anything validation let through.
            _ => {
                let mut shader = LambertShader::new(object.transform, view, projection);
                shader.lights = context.lights.clone();
                shader.ambient_light = Vector3::from(config.render.ambient_light);
                renderer.draw_mesh(&object.mesh, &shader);
            }
        }
    }
}

/// Post-processing: Exposure -> Gamma Correction -> u32 buffer.
pub fn post_process_to_buffer(framebuffer: &FrameBuffer, buffer: &mut [u32], exposure: f32) {
    buffer
        .par_chunks_mut(framebuffer.width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                if let Some(color) = framebuffer.get_pixel(x, y) {
                    let srgb = linear_to_srgb(color * exposure);

                    let r = (srgb.x.clamp(0.0, 1.0) * 255.0) as u32;
                    let g = (srgb.y.clamp(0.0, 1.0) * 255.0) as u32;
                    let b = (srgb.z.clamp(0.0, 1.0) * 255.0) as u32;

                    *pixel = (255 << 24) | (r << 16) | (g << 8) | b;
                } else {
                    *pixel = 0;
                }
            }
        });
}
