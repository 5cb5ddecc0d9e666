use clap::Parser;
use log::{error, warn};
use spheron::app;
use spheron::io::config::Config;
use std::path::Path;
use std::process;

/// Headless software rasterizer for procedurally generated meshes.
#[derive(Parser, Debug)]
#[command(name = "spheron", version, about)]
struct Cli {
    /// Path to the TOML scene description.
    #[arg(short, long, default_value = "scene.toml")]
    config: String,

    /// Override the output file (PNG).
    #[arg(short, long)]
    output: Option<String>,

    /// Override the subdivision depth of every refined-sphere object (0-6).
    #[arg(short, long)]
    depth: Option<u32>,

    /// Override the shader: unlit, lambert, toon, or depth.
    #[arg(long)]
    shader: Option<String>,

    /// Render a turntable sequence with this many frames.
    #[arg(long)]
    frames: Option<u32>,

    /// Override the output width in pixels.
    #[arg(long)]
    width: Option<usize>,

    /// Override the output height in pixels.
    #[arg(long)]
    height: Option<usize>,

    /// Draw triangle edges only.
    #[arg(long)]
    wireframe: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = if Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load '{}': {}", cli.config, e);
                process::exit(1);
            }
        }
    } else {
        warn!(
            "Config file '{}' not found; using the built-in scene.",
            cli.config
        );
        Config::default()
    };

    // CLI flags override the scene file.
    if let Some(output) = cli.output {
        config.render.output = Some(output);
    }
    if let Some(depth) = cli.depth {
        for object in &mut config.objects {
            if object.kind == "subdivided-sphere" {
                object.depth = depth;
            }
        }
    }
    if let Some(shader) = cli.shader {
        config.render.shader = shader;
    }
    if let Some(frames) = cli.frames {
        config.animation.mode = "turntable".to_string();
        config.animation.frames = frames;
    }
    if let Some(width) = cli.width {
        config.render.width = width;
    }
    if let Some(height) = cli.height {
        config.render.height = height;
    }
    if cli.wireframe {
        config.render.wireframe = true;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        process::exit(1);
    }

    if let Err(e) = app::run(&config) {
        error!("{}", e);
        process::exit(1);
    }
}
