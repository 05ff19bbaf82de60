//! Test support utilities for chatfmt.
//!
//! In-memory image builders and output inspection helpers that are useful
//! for testing the renderers, but are not part of the public API.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

pub use crate::wrap::strip_ansi;

/// Encode a `width` x `height` PNG whose pixels come from `pixel(x, y)`.
pub fn png_from_fn(width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba(pixel(x, y)));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("png encoding into memory");
    buf.into_inner()
}

/// A single-color opaque PNG.
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let [r, g, b] = rgb;
    png_from_fn(width, height, |_, _| [r, g, b, 255])
}

/// A single-color JPEG.
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb(rgb));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Jpeg)
        .expect("jpeg encoding into memory");
    buf.into_inner()
}

/// Split rendered half-block output into rows of `(background, foreground)`
/// RGB pairs, one pair per cell.
pub fn cell_colors(rendered: &str) -> Vec<Vec<([u8; 3], [u8; 3])>> {
    rendered
        .split('\n')
        .map(|row| {
            row.split("\x1b[48;2;")
                .skip(1)
                .filter_map(|cell| {
                    let params = cell.split('m').next()?;
                    let values: Vec<u8> = params
                        .split(';')
                        .filter_map(|v| v.parse().ok())
                        .collect();
                    // r;g;b;38;2;r;g;b
                    match values.as_slice() {
                        [tr, tg, tb, 38, 2, br, bg, bb] => {
                            Some(([*tr, *tg, *tb], [*br, *bg, *bb]))
                        }
                        _ => None,
                    }
                })
                .collect()
        })
        .collect()
}
