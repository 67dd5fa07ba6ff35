use std::path::Path;

use anyhow::{Context, Result};
use libdib::{
    clipboard::{Clipboard, ClipboardSink},
    DibFormat, NamedColor, RasterBuffer, Rgba,
};
use tracing::{debug, info, instrument};

mod sink;
pub use sink::DirectorySink;

/// Width of the demo image
pub const DEMO_WIDTH: usize = 12;
/// Height of the demo image
pub const DEMO_HEIGHT: usize = 10;

/// Backgrounds and formats copied by `dibcopy demo` when nothing else is asked for
pub const DEFAULT_DEMO: [(NamedColor, DibFormat); 2] = [
    (NamedColor::SemiAqua, DibFormat::LegacyDib),
    (NamedColor::SemiPink, DibFormat::ExtendedDibLong),
];

/// Builds the 12x10 demo image
///
/// Left column yellow and right column blue (corners excluded), top row red,
/// bottom row green, everything else `background`.
///
/// # Errors
///
/// Only fails if the raster cannot be allocated
pub fn demo_image(background: Rgba) -> Result<RasterBuffer, libdib::Error> {
    let mut image = RasterBuffer::new(DEMO_WIDTH, DEMO_HEIGHT, background)?;
    let (x0, x9) = (0, image.width() - 1);
    let (y0, y9) = (0, image.height() - 1);
    // Left yellow, right blue
    for y in 1..y9 {
        image.set(y, x0, NamedColor::Yellow.rgba())?;
        image.set(y, x9, NamedColor::Blue.rgba())?;
    }
    image.fill_row(y0, NamedColor::Red.rgba())?;
    image.fill_row(y9, NamedColor::Green.rgba())?;
    Ok(image)
}

/// Builds one demo image per job and copies them all in a single clipboard session
///
/// All images are built before the clipboard is opened.
///
/// # Errors
///
/// Fails if an image cannot be built, the sink cannot be acquired, or a copy fails
#[instrument(skip(sink))]
pub fn copy_demo<S: ClipboardSink>(sink: &mut S, jobs: &[(NamedColor, DibFormat)]) -> Result<()> {
    let images = jobs
        .iter()
        .map(|&(background, format)| {
            demo_image(background.rgba()).map(|image| (background, image, format))
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Built {} demo images", images.len());

    let mut clip = Clipboard::open(sink).context("open clipboard")?;
    for (background, image, format) in &images {
        clip.copy_image(image, *format)
            .with_context(|| format!("copy {background} demo image as {format}"))?;
        info!("Copied {background} demo image as {format}");
    }
    Ok(())
}

/// Loads an image file and copies it as `format`
///
/// # Errors
///
/// Fails if the file cannot be decoded, the sink cannot be acquired, or the copy fails
#[instrument(skip(sink))]
pub fn copy_image_file<S: ClipboardSink>(
    sink: &mut S,
    image_file: &Path,
    format: DibFormat,
) -> Result<()> {
    let img = image::open(image_file)
        .with_context(|| format!("open image {}", image_file.display()))?
        .to_rgba8();
    debug!("Read {}x{} image", img.width(), img.height());
    let raster = RasterBuffer::try_from(&img)?;

    let mut clip = Clipboard::open(sink).context("open clipboard")?;
    clip.copy_image(&raster, format)
        .with_context(|| format!("copy {} as {format}", image_file.display()))?;
    info!("Copied {} as {format}", image_file.display());
    Ok(())
}
