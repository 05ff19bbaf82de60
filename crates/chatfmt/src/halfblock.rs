//! Raster images as rows of colored half-block glyphs.
//!
//! Each cell carries two vertically stacked pixels: the top one as the
//! background color and the bottom one as the foreground color of `▄`.
use image::{
    imageops::{self, FilterType},
    Rgba,
};

use crate::{
    error::{DecodeError, Result},
    style::RESET,
};

/// U+2584 LOWER HALF BLOCK
pub const HALF_BLOCK: char = '\u{2584}';

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Newline-joined rows, each terminated by an SGR reset.
    pub text: String,
    /// Number of terminal rows in `text`.
    pub line_count: u32,
    /// Width of the resampled pixel grid (one pixel per column).
    pub width: u32,
    /// Height of the resampled pixel grid, always even.
    pub height: u32,
}

/// Decode `bytes` (PNG or JPEG) and render it into at most
/// `max_width_cells` x `max_height_cells` terminal cells, keeping the
/// aspect ratio.
pub fn render_image_block(
    bytes: &[u8],
    max_width_cells: u32,
    max_height_cells: u32,
) -> Result<RenderedImage> {
    if max_width_cells == 0 || max_height_cells == 0 {
        return Err(DecodeError::EmptyBounds {
            width: max_width_cells,
            height: max_height_cells,
        });
    }
    let source = image::load_from_memory(bytes)?;
    let (src_w, src_h) = (source.width(), source.height());
    if src_w == 0 || src_h == 0 {
        return Err(DecodeError::EmptyImage {
            width: src_w,
            height: src_h,
        });
    }

    let (width, height) = fit_pixels(src_w, src_h, max_width_cells, max_height_cells);
    check_output_size(width, height)?;
    tracing::debug!(src_w, src_h, width, height, "resampling image for half-block output");
    let pixels = imageops::resize(&source.to_rgba8(), width, height, FilterType::CatmullRom);

    let mut text = String::with_capacity((width as usize * 40 + 5) * (height as usize / 2));
    for row in (0..height).step_by(2) {
        if row > 0 {
            text.push('\n');
        }
        for col in 0..width {
            let [tr, tg, tb] = over_black(*pixels.get_pixel(col, row));
            let [br, bg, bb] = over_black(*pixels.get_pixel(col, row + 1));
            text.push_str(&format!(
                "\x1b[48;2;{tr};{tg};{tb};38;2;{br};{bg};{bb}m{HALF_BLOCK}"
            ));
        }
        text.push_str(RESET);
    }

    Ok(RenderedImage {
        text,
        line_count: height / 2,
        width,
        height,
    })
}

/// Destination pixel size for a `src_w` x `src_h` image in a box of
/// `max_width_cells` columns and `max_height_cells` rows.
///
/// Scales to the full width first and falls back to the height limit when
/// that is too tall. The result is at least 1 wide, at most
/// `max_width_cells` wide, and has an even height no greater than
/// `max_height_cells * 2` (for non-zero bounds).
pub fn fit_pixels(
    src_w: u32,
    src_h: u32,
    max_width_cells: u32,
    max_height_cells: u32,
) -> (u32, u32) {
    let (src_w, src_h) = (u64::from(src_w.max(1)), u64::from(src_h.max(1)));
    let max_w = u64::from(max_width_cells);
    let max_h = u64::from(max_height_cells) * 2;

    let mut w = max_w;
    let mut h = src_h * w / src_w;
    if h > max_h {
        h = max_h;
        w = src_w * h / src_h;
    }
    let w = w.min(max_w).max(1);
    let mut h = h.max(1);
    if h % 2 != 0 {
        h += 1;
    }
    (
        u32::try_from(w).unwrap_or(u32::MAX),
        u32::try_from(h).unwrap_or(u32::MAX - 1),
    )
}

/// Worst-case output bytes per destination pixel: half of a
/// `ESC[48;2;255;255;255;38;2;255;255;255m▄` cell. The RGBA buffer needs less.
const TEXT_BYTES_PER_PIXEL: u64 = 20;

/// Reject grids whose output would exceed the `image` crate's default
/// allocation limit.
fn check_output_size(width: u32, height: u32) -> Result<()> {
    let limit = image::Limits::default().max_alloc.unwrap_or(u64::MAX);
    let needed = u64::from(width) * u64::from(height) * TEXT_BYTES_PER_PIXEL;
    if needed > limit {
        return Err(DecodeError::TooLarge {
            width,
            height,
            limit,
        });
    }
    Ok(())
}

/// Composite onto black, so transparent regions render dark.
fn over_black(Rgba([r, g, b, a]): Rgba<u8>) -> [u8; 3] {
    let scale = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
    [scale(r), scale(g), scale(b)]
}
