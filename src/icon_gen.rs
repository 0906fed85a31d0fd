use crate::logo::render_logo;
use crate::style::LogoStyle;
use crate::text::FontSet;
use anyhow::{Context, Result};
use image::{
    codecs::{
        ico::{IcoEncoder, IcoFrame},
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    ColorType, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// One output raster: pixel size, file name and whether it needs a safe zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconSpec {
    pub size: u32,
    pub filename: &'static str,
    pub maskable: bool,
}

const fn entry(size: u32, filename: &'static str, maskable: bool) -> IconSpec {
    IconSpec {
        size,
        filename,
        maskable,
    }
}

/// Every icon the web app references, smallest first.
pub const ICON_TABLE: [IconSpec; 16] = [
    entry(16, "favicon-16x16.png", false),
    entry(32, "favicon-32x32.png", false),
    entry(48, "icon-48x48.png", false),
    entry(72, "icon-72x72.png", false),
    entry(96, "icon-96x96.png", false),
    entry(128, "icon-128x128.png", false),
    entry(144, "icon-144x144.png", false),
    entry(152, "icon-152x152.png", false),
    entry(167, "icon-167x167.png", false),
    entry(180, "apple-touch-icon.png", false),
    entry(192, "icon-192x192.png", false),
    entry(256, "icon-256x256.png", false),
    entry(384, "icon-384x384.png", false),
    entry(512, "icon-512x512.png", false),
    entry(512, "icon-512x512-maskable.png", true),
    entry(1024, "icon-1024x1024.png", false),
];

/// Rasters bundled into the favicon, largest first.
pub const FAVICON_SOURCES: [&str; 2] = ["favicon-32x32.png", "favicon-16x16.png"];

#[derive(Debug)]
pub struct GenerateOptions {
    pub style: LogoStyle,
    pub out_dir: PathBuf,
    pub favicon: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaviconOutcome {
    /// A real ICO with a 32px and a 16px frame.
    MultiResolution,
    /// The ICO encoder failed; the 32px PNG was written under the favicon name.
    PngFallback,
    /// Neither could be written.
    Missing,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(&'static str, String)>,
    pub favicon: FaviconOutcome,
}

pub fn generate_icons(options: &GenerateOptions) -> Result<GenerationReport> {
    create_dir_all(&options.out_dir).context("Can't create output directory")?;

    let style = &options.style;
    let fonts = FontSet::resolve(&style.title_fonts, &style.subtitle_fonts);

    println!("Creating {} AEYE.NG icons...", style.name);
    let mut written = Vec::new();
    let mut failed = Vec::new();

    for entry in ICON_TABLE {
        let marker = if entry.maskable { " [maskable]" } else { "" };
        println!("Creating {} ({}x{}){marker}", entry.filename, entry.size, entry.size);

        let output_path = options.out_dir.join(entry.filename);
        match generate_entry(&entry, style, &fonts, &output_path) {
            Ok(bytes) => {
                println!("  ✓ Created {} ({bytes} bytes)", output_path.display());
                written.push(output_path);
            }
            Err(err) => {
                tracing::warn!("{}: {err:#}", entry.filename);
                println!("  ✗ Could not create {}: {err:#}", entry.filename);
                failed.push((entry.filename, format!("{err:#}")));
            }
        }
    }

    let favicon = write_favicon(&options.out_dir, &options.favicon);

    Ok(GenerationReport {
        written,
        failed,
        favicon,
    })
}

fn generate_entry(entry: &IconSpec, style: &LogoStyle, fonts: &FontSet, path: &Path) -> Result<u64> {
    let logo = render_logo(entry.size, entry.maskable, style, fonts);
    save_png(&logo.image, path)?;
    Ok(std::fs::metadata(path)?.len())
}

/// Bundle the small favicons into one ICO. Falls back to writing the 32px
/// raster as a PNG under the favicon name if the ICO cannot be produced.
pub fn write_favicon(icons_dir: &Path, favicon: &Path) -> FaviconOutcome {
    if let Some(parent) = favicon.parent() {
        if let Err(err) = create_dir_all(parent) {
            tracing::warn!("Can't create {}: {err}", parent.display());
        }
    }

    match generate_ico(icons_dir, favicon) {
        Ok(()) => {
            println!("  ✓ Created {}", favicon.display());
            return FaviconOutcome::MultiResolution;
        }
        Err(err) => {
            tracing::warn!("ICO encoding failed, falling back to PNG: {err:#}");
            println!("  ⚠ Could not create {} as ICO: {err:#}", favicon.display());
        }
    }

    let fallback = image::open(icons_dir.join(FAVICON_SOURCES[0]))
        .context("Failed to load 32px favicon")
        .and_then(|img| save_png(&img.to_rgba8(), favicon));

    match fallback {
        Ok(()) => {
            println!("  ✓ Created {} (PNG format)", favicon.display());
            FaviconOutcome::PngFallback
        }
        Err(err) => {
            tracing::warn!("favicon fallback failed: {err:#}");
            println!("  ✗ Could not create {}", favicon.display());
            FaviconOutcome::Missing
        }
    }
}

fn generate_ico(icons_dir: &Path, favicon: &Path) -> Result<()> {
    let mut frames = Vec::new();

    for name in FAVICON_SOURCES {
        let rgba_image = image::open(icons_dir.join(name))
            .with_context(|| format!("Failed to load {name}"))?
            .to_rgba8();
        let (width, height) = rgba_image.dimensions();
        frames.push(IcoFrame::as_png(
            rgba_image.as_raw(),
            width,
            height,
            ColorType::Rgba8,
        )?);
    }

    let mut out_file = BufWriter::new(File::create(favicon)?);
    let encoder = IcoEncoder::new(&mut out_file);
    encoder.encode_images(&frames)?;
    out_file.flush()?;
    Ok(())
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).context("Failed to create PNG file")?;
    let mut out_file = BufWriter::new(file);
    write_png(image.as_raw(), &mut out_file, image.width(), image.height())
        .context("Failed to write PNG")?;
    out_file.flush()?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}
