use crate::core::rasterizer::CullMode;
use crate::io::config::Config;
use crate::io::image::save_buffer_to_image;
use crate::pipeline::passes::{post_process_to_buffer, render_scene};
use crate::pipeline::renderer::Renderer;
use crate::scene::context::RenderContext;
use crate::scene::loader::{init_scene, rebuild_subdivided_spheres};
use crate::scene::orbit::OrbitController;
use chrono::Local;
use log::{debug, info};
use std::time::Instant;

/// Renders the configured scene headlessly: a single frame, a turntable
/// sequence, or a subdivision depth sweep.
pub fn run(config: &Config) -> Result<(), String> {
    let start_time = Instant::now();
    let mut context = init_scene(config);

    let mut renderer = Renderer::new(
        config.render.width,
        config.render.height,
        config.render.samples,
    );
    renderer.rasterizer.set_cull_mode(match config.render.cull_mode.as_str() {
        "front" => CullMode::Front,
        "none" => CullMode::None,
        _ => CullMode::Back,
    });
    renderer.rasterizer.wireframe = config.render.wireframe;

    let stem = output_stem(config);

    match config.animation.mode.as_str() {
        "turntable" => render_turntable(config, &mut context, &mut renderer, &stem)?,
        "depth-sweep" => render_depth_sweep(config, &mut context, &mut renderer, &stem)?,
        _ => {
            render_and_save(config, &context, &mut renderer, &format!("{stem}.png"))?;
        }
    }

    info!("Done in {:.2?}.", start_time.elapsed());
    Ok(())
}

/// One frame per azimuth step; point lights circle the scene alongside the
/// camera when enabled.
fn render_turntable(
    config: &Config,
    context: &mut RenderContext,
    renderer: &mut Renderer,
    stem: &str,
) -> Result<(), String> {
    let frames = config.animation.frames;
    let camera_step = config.animation.orbit_step_deg.to_radians();
    let light_step = config.animation.light_orbit_step_deg.to_radians();

    let mut orbit = OrbitController::from_camera(
        &context.camera,
        config.camera.rotate_step,
        config.camera.zoom_step,
        config.camera.min_radius,
        config.camera.max_radius,
    );

    info!(
        "Rendering {} turntable frames ({} deg per frame)...",
        frames, config.animation.orbit_step_deg
    );

    for frame in 0..frames {
        render_and_save(config, context, renderer, &format!("{stem}_{frame:03}.png"))?;

        orbit.rotate_azimuth(camera_step);
        orbit.apply(&mut context.camera);

        if config.animation.orbit_lights {
            for light in &mut context.lights {
                light.orbit_around_y(light_step);
            }
        }
    }

    Ok(())
}

/// One frame per subdivision depth, regenerating the refined spheres each
/// time; the previous mesh is released as its replacement is installed.
fn render_depth_sweep(
    config: &Config,
    context: &mut RenderContext,
    renderer: &mut Renderer,
    stem: &str,
) -> Result<(), String> {
    let max_depth = config
        .objects
        .iter()
        .filter(|o| o.kind == "subdivided-sphere")
        .map(|o| o.depth)
        .max()
        .unwrap_or(0);

    info!("Rendering depth sweep 0..={max_depth}...");

    for depth in 0..=max_depth {
        rebuild_subdivided_spheres(context, config, depth);
        render_and_save(
            config,
            context,
            renderer,
            &format!("{stem}_depth{depth}.png"),
        )?;
    }

    Ok(())
}

fn render_and_save(
    config: &Config,
    context: &RenderContext,
    renderer: &mut Renderer,
    path: &str,
) -> Result<(), String> {
    let frame_start = Instant::now();
    render_scene(config, context, renderer);
    debug!("Frame rendered in {:.2?}.", frame_start.elapsed());

    let mut buffer = vec![0u32; config.render.width * config.render.height];
    post_process_to_buffer(&renderer.framebuffer, &mut buffer, config.render.exposure);
    save_buffer_to_image(&buffer, config.render.width, config.render.height, path)?;

    info!("Saved '{path}'.");
    Ok(())
}

/// Output filename without the .png suffix; sequence frames append their own
/// tags. Falls back to a timestamped name.
fn output_stem(config: &Config) -> String {
    match &config.render.output {
        Some(name) => name.strip_suffix(".png").unwrap_or(name).to_string(),
        None => format!("spheron_{}", Local::now().format("%Y%m%d_%H%M%S")),
    }
}
