use std::path::Path;

use glam::{Vec2, Vec3};
use lux::prelude::{AnyImage, Frgb, Image, Ucolor};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .compact()
        .try_init();
}

/// A white disk with a soft edge on a black background.
///
/// `softness` is the width of the falloff as a fraction of the radius.
pub fn disk_brush(size: u32, softness: f32) -> Image<Frgb> {
    let mut img = Image::new(size, size);
    let softness = softness.clamp(1e-3, 1.0);
    for y in 0..size {
        for x in 0..size {
            let d = img.pixel_center(x, y).length();
            let v = ((1.0 - d) / softness).clamp(0.0, 1.0);
            img.set(x, y, Vec3::splat(v));
        }
    }
    img
}

/// Load a PNG as packed ARGB pixels.
pub fn load_png(path: impl AsRef<Path>) -> anyhow::Result<Image<Ucolor>> {
    let rgba = image::open(path.as_ref())?.to_rgba8();
    let (width, height) = rgba.dimensions();
    let pixels = rgba
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            Ucolor::from_argb(a, r, g, b)
        })
        .collect();
    Ok(Image::from_pixels(width, height, pixels)?)
}

/// Write any output image as an 8-bit PNG.
///
/// Vector fields map `x` and `y` from `[-1, 1]` onto the red and green channels.
pub fn save_png(img: &AnyImage, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let (width, height) = img.size();
    let out = match img {
        AnyImage::Frgb(img) => image::RgbaImage::from_fn(width, height, |x, y| {
            let c = img.get(x, y).unwrap_or_default();
            image::Rgba([to_u8(c.x), to_u8(c.y), to_u8(c.z), 255])
        }),
        AnyImage::Ucolor(img) => image::RgbaImage::from_fn(width, height, |x, y| {
            let [a, r, g, b] = img.get(x, y).unwrap_or_default().channels();
            image::Rgba([r, g, b, a])
        }),
        AnyImage::Field(img) => image::RgbaImage::from_fn(width, height, |x, y| {
            let v = img.get(x, y).unwrap_or_default() * 0.5 + Vec2::splat(0.5);
            image::Rgba([to_u8(v.x), to_u8(v.y), 128, 255])
        }),
    };
    out.save(path.as_ref())?;
    info!("Wrote {}x{} image to {}.", width, height, path.as_ref().display());
    Ok(())
}

fn to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
