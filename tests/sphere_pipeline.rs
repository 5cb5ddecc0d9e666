use spheron::io::config::Config;
use spheron::pipeline::passes::render_scene;
use spheron::pipeline::renderer::Renderer;
use spheron::scene::loader::init_scene;

/// A 64x64 scene with a single refined sphere filling the middle of the
/// frame against a black background.
fn sphere_config(shader: &str) -> Config {
    let mut config = Config::default();
    config.render.width = 64;
    config.render.height = 64;
    config.render.samples = 1;
    config.render.shader = shader.to_string();
    config.render.background_color = Some([0.0, 0.0, 0.0]);
    config.camera.position = [0.0, 0.0, 3.0];
    config.camera.fov = 45.0;
    config.objects.retain(|o| o.kind == "subdivided-sphere");
    config.validate().expect("test scene must validate");
    config
}

fn render(config: &Config) -> Renderer {
    let context = init_scene(config);
    let mut renderer = Renderer::new(
        config.render.width,
        config.render.height,
        config.render.samples,
    );
    render_scene(config, &context, &mut renderer);
    renderer
}

#[test]
fn unlit_sphere_shows_height_hues() {
    let renderer = render(&sphere_config("unlit"));

    // The sphere's front center sits at height 0: a cyan-dominated hue.
    let center = renderer.framebuffer.get_pixel(32, 32).unwrap();
    assert!(center.y > 0.5, "green channel too low: {center:?}");
    assert!(center.z > 0.4, "blue channel too low: {center:?}");
    assert!(center.x < 0.5, "red channel too high: {center:?}");

    // Corners stay background-black.
    let corner = renderer.framebuffer.get_pixel(1, 1).unwrap();
    assert!(corner.norm() < 1e-6);
}

#[test]
fn lambert_shading_follows_the_light() {
    // Default light shines from (+1, +1, +1) toward the origin.
    let renderer = render(&sphere_config("lambert"));

    let luminance = |x: usize, y: usize| {
        let c = renderer.framebuffer.get_pixel(x, y).unwrap();
        c.x + c.y + c.z
    };

    // Screen y grows downward: (42, 22) is the upper-right of the sphere.
    let lit = luminance(42, 22);
    let shadowed = luminance(22, 42);
    assert!(
        lit > shadowed + 0.1,
        "expected the lit quadrant to be brighter: {lit} vs {shadowed}"
    );
}

#[test]
fn depth_shading_darkens_toward_the_camera() {
    let renderer = render(&sphere_config("depth"));

    let center = renderer.framebuffer.get_pixel(32, 32).unwrap();
    let off_center = renderer.framebuffer.get_pixel(52, 32).unwrap();

    // Both pixels are on the sphere, grayscale.
    assert!(center.x > 0.0 && center.x < 1.0);
    assert!((center.x - center.y).abs() < 1e-6);

    // The silhouette is farther from the camera than the front pole.
    assert!(off_center.x > center.x);
}

#[test]
fn wireframe_mode_leaves_gaps_on_the_sphere() {
    let mut config = sphere_config("unlit");
    config.render.wireframe = true;
    // Depth 1 keeps the triangles large enough that their interiors clearly
    // miss the edge threshold.
    for object in &mut config.objects {
        object.depth = 1;
    }

    let renderer = render(&config);

    let mut covered = 0;
    let mut empty = 0;
    for y in 24..40 {
        for x in 24..40 {
            if renderer.framebuffer.get_pixel(x, y).unwrap().norm() > 1e-6 {
                covered += 1;
            } else {
                empty += 1;
            }
        }
    }
    assert!(covered > 0, "edges should be drawn");
    assert!(empty > 0, "triangle interiors should be skipped");
}
