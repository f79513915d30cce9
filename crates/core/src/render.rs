//! Animated rendering of recorded history
//!
//! Each history block becomes one GIF frame. Cells are drawn as
//! `scale`×`scale` squares coloured on a reversed red-yellow-green ramp:
//! empty ground green, trees light green, fire orange and charred cells red.

use crate::core_types::CellState;
use crate::error::SimError;
use crate::grid::CellGrid;
use crate::history::load_history;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// RGBA colour per state, indexed by state code
pub const PALETTE: [[u8; 4]; 4] = [
    [0, 104, 55, 255],    // empty
    [166, 217, 106, 255], // tree
    [253, 174, 97, 255],  // fire
    [165, 0, 38, 255],    // charred
];

/// Frame layout and timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Pixels per cell along each axis
    pub scale: u32,
    /// Display time of each frame in milliseconds
    pub frame_delay_ms: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            scale: 2,
            frame_delay_ms: 100,
        }
    }
}

/// Colour a state is drawn with
#[inline]
pub fn state_color(state: CellState) -> Rgba<u8> {
    Rgba(PALETTE[usize::from(state.code())])
}

/// Draw one grid as an RGBA image, row 0 at the top
///
/// # Errors
///
/// Returns [`SimError::InvalidDimension`] for a zero `scale` or an image
/// too large for 32-bit pixel coordinates.
pub fn render_frame(grid: &CellGrid, scale: u32) -> Result<RgbaImage, SimError> {
    if scale == 0 {
        return Err(SimError::InvalidDimension {
            axis: "scale",
            value: 0,
        });
    }
    let image_width = pixel_extent("image width", grid.width(), scale)?;
    let image_height = pixel_extent("image height", grid.height(), scale)?;

    Ok(RgbaImage::from_fn(image_width, image_height, |x, y| {
        state_color(grid.get((y / scale) as usize, (x / scale) as usize))
    }))
}

fn pixel_extent(axis: &'static str, cells: usize, scale: u32) -> Result<u32, SimError> {
    u32::try_from(cells)
        .ok()
        .and_then(|cells| cells.checked_mul(scale))
        .ok_or(SimError::InvalidDimension { axis, value: cells })
}

/// Encode `blocks` as a looping GIF, one frame per block in order
///
/// Returns the number of frames written.
///
/// # Errors
///
/// Returns a frame error from [`render_frame`] or [`SimError::Render`] if
/// encoding fails.
pub fn write_gif<W: Write>(
    writer: W,
    blocks: &[CellGrid],
    options: &RenderOptions,
) -> Result<usize, SimError> {
    let delay = Delay::from_numer_denom_ms(options.frame_delay_ms, 1);
    let mut encoder = GifEncoder::new(writer);
    encoder.set_repeat(Repeat::Infinite)?;

    for grid in blocks {
        let frame = Frame::from_parts(render_frame(grid, options.scale)?, 0, 0, delay);
        encoder.encode_frame(frame)?;
    }
    Ok(blocks.len())
}

/// Read a history file and write it out as an animated GIF
///
/// Returns the number of frames, which equals the number of recorded blocks.
///
/// # Errors
///
/// Any error from [`load_history`] or [`write_gif`], or [`SimError::Io`] if
/// the GIF file cannot be written.
pub fn render_history_gif(
    history_path: impl AsRef<Path>,
    width: usize,
    height: usize,
    gif_path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<usize, SimError> {
    let blocks = load_history(history_path.as_ref(), width, height)?;

    let gif_path = gif_path.as_ref();
    let file = File::create(gif_path).map_err(|e| SimError::io(gif_path, e))?;
    let mut out = BufWriter::new(file);
    let frames = write_gif(&mut out, &blocks, options)?;
    out.flush().map_err(|e| SimError::io(gif_path, e))?;

    info!(
        "Rendered {} frames of {}x{} to {}",
        frames,
        width,
        height,
        gif_path.display()
    );
    Ok(frames)
}
