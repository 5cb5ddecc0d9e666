use nalgebra::Vector3;

/// Converts linear RGB to sRGB (Gamma Correction).
/// Applied as the last step before quantizing to 8-bit output.
pub fn linear_to_srgb(color: Vector3<f32>) -> Vector3<f32> {
    let gamma = 1.0 / 2.2;
    Vector3::new(
        color.x.powf(gamma),
        color.y.powf(gamma),
        color.z.powf(gamma),
    )
}

/// Converts an HSL triple (all components in 0.0..1.0) to linear RGB.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vector3<f32> {
    if s <= 0.0 {
        return Vector3::new(l, l, l);
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Vector3::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Maps a height in [-1, 1] to a fully saturated hue, the gradient used for
/// the refined sphere.
pub fn height_hue(y: f32) -> Vector3<f32> {
    hsl_to_rgb((y + 1.0) * 0.5, 1.0, 0.5)
}
