//! Tracing setup and PNG rendering of a finished tiling run.
use std::path::Path;

use anyhow::{bail, Context, Result};
use field_tiler::geometry::Rect;
use field_tiler::pipeline::runner::RunResult;
use glam::DVec2;
use image::{Rgb, RgbImage};
use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber, honouring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Colours and image size used by [`render_tiling_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub size_px: (u32, u32),
    pub margin_px: u32,
    pub background: [u8; 3],
    pub care_area_fill: [u8; 3],
    pub main_field_stroke: [u8; 3],
    pub sub_field_stroke: [u8; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size_px: (1000, 1000),
            margin_px: 20,
            background: [250, 250, 250],
            care_area_fill: [214, 230, 245],
            main_field_stroke: [200, 60, 40],
            sub_field_stroke: [60, 90, 140],
        }
    }
}

impl RenderConfig {
    pub fn new(size_px: (u32, u32)) -> Self {
        Self {
            size_px,
            ..Default::default()
        }
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

/// Maps world coordinates onto the image, y pointing up.
struct Viewport {
    world_min: DVec2,
    scale: f64,
    margin: f64,
    height: u32,
}

impl Viewport {
    fn fit(bounds: (DVec2, DVec2), config: &RenderConfig) -> Self {
        let (w, h) = config.size_px;
        let margin = config.margin_px as f64;
        let extent = (bounds.1 - bounds.0).max(DVec2::splat(f64::MIN_POSITIVE));
        let usable = DVec2::new(w as f64 - 2.0 * margin, h as f64 - 2.0 * margin)
            .max(DVec2::ONE);
        let scale = (usable / extent).min_element();
        Self {
            world_min: bounds.0,
            scale,
            margin,
            height: h,
        }
    }

    /// Pixel-space `(x0, y0, x1, y1)` of a rectangle, rows counted from the top.
    fn to_px(&self, r: &Rect) -> (i64, i64, i64, i64) {
        let lo = (r.min() - self.world_min) * self.scale + self.margin;
        let hi = (r.max() - self.world_min) * self.scale + self.margin;
        let flip = |y: f64| self.height as f64 - y;
        (
            lo.x.round() as i64,
            flip(hi.y).round() as i64,
            hi.x.round() as i64,
            flip(lo.y).round() as i64,
        )
    }
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn fill_rect(img: &mut RgbImage, (x0, y0, x1, y1): (i64, i64, i64, i64), color: [u8; 3]) {
    for y in y0..y1 {
        for x in x0..x1 {
            put(img, x, y, color);
        }
    }
}

fn stroke_rect(img: &mut RgbImage, (x0, y0, x1, y1): (i64, i64, i64, i64), color: [u8; 3]) {
    for x in x0..=x1 {
        put(img, x, y0, color);
        put(img, x, y1, color);
    }
    for y in y0..=y1 {
        put(img, x0, y, color);
        put(img, x1, y, color);
    }
}

/// Draws care areas, sub-fields and main fields of `result` into an image.
pub fn render_tiling(
    care_areas: &[Rect],
    result: &RunResult,
    config: &RenderConfig,
) -> Result<RgbImage> {
    let (w, h) = config.size_px;
    if w == 0 || h == 0 {
        bail!("render size must be non-zero, got {w}x{h}");
    }

    let bounds = care_areas
        .iter()
        .chain(result.main_fields.iter().map(|mf| &mf.rect))
        .map(|r| (r.min(), r.max()))
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
        .context("nothing to render")?;
    let viewport = Viewport::fit(bounds, config);

    let mut img = RgbImage::from_pixel(w, h, Rgb(config.background));
    for ca in care_areas {
        fill_rect(&mut img, viewport.to_px(ca), config.care_area_fill);
    }
    for sf in &result.sub_fields {
        stroke_rect(&mut img, viewport.to_px(&sf.rect), config.sub_field_stroke);
    }
    for mf in &result.main_fields {
        stroke_rect(&mut img, viewport.to_px(&mf.rect), config.main_field_stroke);
    }
    Ok(img)
}

/// Renders the run and saves it as a PNG at `out_path`.
pub fn render_tiling_to_png(
    care_areas: &[Rect],
    result: &RunResult,
    config: &RenderConfig,
    out_path: &Path,
) -> Result<()> {
    let img = render_tiling(care_areas, result, config)?;
    img.save(out_path)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    tracing::info!("Wrote {}", out_path.display());
    Ok(())
}
