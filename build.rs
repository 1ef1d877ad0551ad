//! Build script for ErrorLookup.
//!
//! Generates the application icon programmatically and, on Windows, embeds
//! it along with the application manifest into the final executable.

use std::path::Path;

const ICON_PATH: &str = "assets/icon.ico";
const ICON_SIZES: [u32; 4] = [256, 48, 32, 16];

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=assets/app.manifest");

    // main.rs embeds the icon on every target.
    generate_icon();

    if std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let mut res = winresource::WindowsResource::new();
    res.set_icon(ICON_PATH);
    res.set_manifest_file("assets/app.manifest");
    res.set("ProductName", "ErrorLookup");
    res.set("FileDescription", "Windows Error Code Lookup");

    if let Err(e) = res.compile() {
        eprintln!("cargo:warning=Failed to compile Windows resources: {e}");
    }
}

/// Write `assets/icon.ico` with one PNG-compressed image per size, unless
/// it already exists.
fn generate_icon() {
    if Path::new(ICON_PATH).exists() {
        return;
    }

    let images: Vec<(u32, Vec<u8>)> = ICON_SIZES
        .iter()
        .map(|&size| {
            let mut png = Vec::new();
            let encoder = image::codecs::png::PngEncoder::new(&mut png);
            image::ImageEncoder::write_image(
                encoder,
                &render_icon(size),
                size,
                size,
                image::ExtendedColorType::Rgba8,
            )
            .expect("PNG encoding failed");
            (size, png)
        })
        .collect();

    // ICONDIR, then one ICONDIRENTRY per image, then the image data.
    let mut ico = Vec::new();
    ico.extend_from_slice(&[0, 0, 1, 0]);
    ico.extend_from_slice(&(images.len() as u16).to_le_bytes());

    let mut offset = 6 + images.len() * 16;
    for (size, png) in &images {
        let side = if *size >= 256 { 0 } else { *size as u8 };
        ico.extend_from_slice(&[side, side, 0, 0]);
        ico.extend_from_slice(&1u16.to_le_bytes());
        ico.extend_from_slice(&32u16.to_le_bytes());
        ico.extend_from_slice(&(png.len() as u32).to_le_bytes());
        ico.extend_from_slice(&(offset as u32).to_le_bytes());
        offset += png.len();
    }
    for (_, png) in &images {
        ico.extend_from_slice(png);
    }

    std::fs::create_dir_all("assets").expect("Failed to create assets/");
    std::fs::write(ICON_PATH, &ico).expect("Failed to write icon.ico");
}

type Rgba = [u8; 4];

const BACKGROUND: Rgba = [30, 30, 46, 255];
const WARNING_RED: Rgba = [224, 108, 96, 255];
const GLYPH_WHITE: Rgba = [245, 245, 250, 255];
const ACCENT_TEAL: Rgba = [80, 200, 220, 230];

/// Square RGBA canvas with antialiased shape helpers.
struct Canvas {
    size: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; (size * size * 4) as usize],
        }
    }

    /// Source-over blend of `colour` at `coverage` (0..=1) onto pixel `(x, y)`.
    fn blend(&mut self, x: u32, y: u32, colour: Rgba, coverage: f64) {
        let i = ((y * self.size + x) * 4) as usize;
        let Some(dst) = self.pixels.get_mut(i..i + 4) else {
            return;
        };
        let src_a = f64::from(colour[3]) / 255.0 * coverage.clamp(0.0, 1.0);
        let dst_a = f64::from(dst[3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let mixed =
                f64::from(colour[c]) * src_a + f64::from(dst[c]) * dst_a * (1.0 - src_a);
            dst[c] = (mixed / out_a) as u8;
        }
        dst[3] = (out_a * 255.0) as u8;
    }

    /// Paint every pixel whose signed distance to a shape is below zero,
    /// with a one-pixel antialiased edge. `bounds` limits the scan.
    fn fill(&mut self, bounds: (f64, f64, f64, f64), colour: Rgba, sdf: impl Fn(f64, f64) -> f64) {
        let max = f64::from(self.size - 1);
        let (x0, y0, x1, y1) = bounds;
        let (x0, y0) = (x0.floor().max(0.0) as u32, y0.floor().max(0.0) as u32);
        let (x1, y1) = (x1.ceil().min(max) as u32, y1.ceil().min(max) as u32);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = sdf(f64::from(x) + 0.5, f64::from(y) + 0.5);
                if d < 0.5 {
                    self.blend(x, y, colour, 0.5 - d);
                }
            }
        }
    }

    fn disc(&mut self, cx: f64, cy: f64, r: f64, colour: Rgba) {
        self.fill((cx - r - 1.0, cy - r - 1.0, cx + r + 1.0, cy + r + 1.0), colour, |x, y| {
            ((x - cx).powi(2) + (y - cy).powi(2)).sqrt() - r
        });
    }

    /// Line segment with round caps.
    fn stroke(&mut self, from: (f64, f64), to: (f64, f64), width: f64, colour: Rgba) {
        let half = width / 2.0;
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let len_sq = (dx * dx + dy * dy).max(f64::EPSILON);
        let bounds = (
            from.0.min(to.0) - half - 1.0,
            from.1.min(to.1) - half - 1.0,
            from.0.max(to.0) + half + 1.0,
            from.1.max(to.1) + half + 1.0,
        );
        self.fill(bounds, colour, |x, y| {
            let t = (((x - from.0) * dx + (y - from.1) * dy) / len_sq).clamp(0.0, 1.0);
            let (px, py) = (from.0 + t * dx, from.1 + t * dy);
            ((x - px).powi(2) + (y - py).powi(2)).sqrt() - half
        });
    }

    /// Rounded square covering the whole canvas.
    fn rounded_background(&mut self, radius: f64, colour: Rgba) {
        let s = f64::from(self.size);
        self.fill((0.0, 0.0, s, s), colour, |x, y| {
            let qx = (x - s / 2.0).abs() - (s / 2.0 - radius);
            let qy = (y - s / 2.0).abs() - (s / 2.0 - radius);
            let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
            outside + qx.max(qy).min(0.0) - radius
        });
    }
}

/// The ErrorLookup icon: a red warning disc with an exclamation mark,
/// above three short "hex digit" bars.
fn render_icon(size: u32) -> Vec<u8> {
    let s = f64::from(size);
    let mut canvas = Canvas::new(size);

    canvas.rounded_background(s * 0.18, BACKGROUND);

    let (cx, cy, r) = (s * 0.5, s * 0.42, s * 0.28);
    canvas.disc(cx, cy, r, WARNING_RED);

    let glyph = (s * 0.075).max(1.5);
    canvas.stroke((cx, cy - r * 0.6), (cx, cy + r * 0.15), glyph, GLYPH_WHITE);
    canvas.disc(cx, cy + r * 0.52, glyph * 0.6, GLYPH_WHITE);

    let bar_y = s * 0.83;
    for i in 0..3 {
        let x0 = s * (0.2 + 0.22 * f64::from(i));
        canvas.stroke((x0, bar_y), (x0 + s * 0.15, bar_y), (s * 0.05).max(1.0), ACCENT_TEAL);
    }

    canvas.pixels
}
