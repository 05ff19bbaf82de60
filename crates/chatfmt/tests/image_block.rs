use chatfmt::{
    halfblock::{fit_pixels, HALF_BLOCK},
    render_image_block,
    test_support::{cell_colors, png_from_fn, solid_jpeg, solid_png},
    DecodeError,
};
use pretty_assertions::assert_eq;

fn close(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= 1)
}

#[test]
fn fit_scales_by_width_first() {
    assert_eq!(fit_pixels(100, 50, 20, 10), (20, 10));
}

#[test]
fn fit_falls_back_to_height() {
    assert_eq!(fit_pixels(50, 100, 20, 10), (10, 20));
}

#[test]
fn fit_rounds_odd_height_up() {
    assert_eq!(fit_pixels(10, 3, 10, 5), (10, 4));
}

#[test]
fn fit_clamps_degenerate_aspects() {
    assert_eq!(fit_pixels(1000, 1, 10, 5), (10, 2));
    assert_eq!(fit_pixels(1, 1000, 10, 5), (1, 10));
}

#[test]
fn fit_always_within_bounds_and_even() {
    let sources = [(1, 1), (3, 7), (640, 480), (480, 640), (1920, 1), (1, 1920), (33, 17)];
    let bounds = [(1, 1), (1, 40), (40, 1), (7, 3), (80, 24), (200, 60)];
    for &(sw, sh) in &sources {
        for &(mw, mh) in &bounds {
            let (w, h) = fit_pixels(sw, sh, mw, mh);
            assert!(w >= 1 && w <= mw, "{sw}x{sh} in {mw}x{mh}: width {w}");
            assert!(h >= 2 && h <= mh * 2, "{sw}x{sh} in {mw}x{mh}: height {h}");
            assert_eq!(h % 2, 0);
        }
    }
}

#[test]
fn solid_png_renders_uniform_cells() {
    let png = solid_png(4, 4, [255, 0, 0]);
    let out = render_image_block(&png, 4, 2).unwrap();
    assert_eq!((out.width, out.height, out.line_count), (4, 4, 2));

    let rows = cell_colors(&out.text);
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row.len(), 4);
        for (bg, fg) in row {
            assert!(close(bg, [255, 0, 0]) && close(fg, [255, 0, 0]));
        }
    }
}

#[test]
fn top_pixel_is_background_bottom_is_foreground() {
    let palette = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
    let png = png_from_fn(3, 4, |_, y| {
        let [r, g, b] = palette[y as usize];
        [r, g, b, 255]
    });
    let out = render_image_block(&png, 3, 2).unwrap();
    assert_eq!((out.width, out.height), (3, 4));

    let rows = cell_colors(&out.text);
    for (bg, fg) in &rows[0] {
        assert!(close(*bg, palette[0]) && close(*fg, palette[1]));
    }
    for (bg, fg) in &rows[1] {
        assert!(close(*bg, palette[2]) && close(*fg, palette[3]));
    }
}

#[test]
fn transparent_pixels_render_black() {
    let png = png_from_fn(2, 2, |_, _| [255, 255, 255, 0]);
    let out = render_image_block(&png, 2, 1).unwrap();
    for (bg, fg) in &cell_colors(&out.text)[0] {
        assert_eq!((*bg, *fg), ([0, 0, 0], [0, 0, 0]));
    }
}

#[test]
fn row_layout() {
    let png = solid_png(2, 2, [10, 20, 30]);
    let out = render_image_block(&png, 10, 10).unwrap();
    assert_eq!((out.width, out.height, out.line_count), (10, 10, 5));

    let lines: Vec<&str> = out.text.split('\n').collect();
    assert_eq!(lines.len(), out.line_count as usize);
    for line in lines {
        assert_eq!(line.matches(HALF_BLOCK).count(), 10);
        assert!(line.ends_with("\x1b[0m"));
    }
}

#[test]
fn jpeg_is_supported() {
    let jpeg = solid_jpeg(8, 8, [200, 100, 50]);
    let out = render_image_block(&jpeg, 4, 2).unwrap();
    assert_eq!((out.width, out.height, out.line_count), (4, 4, 2));
}

#[test]
fn wide_image_is_limited_by_width() {
    let png = solid_png(40, 10, [0, 0, 0]);
    let out = render_image_block(&png, 8, 8).unwrap();
    assert_eq!((out.width, out.height, out.line_count), (8, 2, 1));
}

#[test]
fn garbage_bytes_fail_to_decode() {
    for bytes in [&b""[..], &b"definitely not an image"[..], &b"\x89PNG\r\n"[..]] {
        let err = render_image_block(bytes, 10, 10).unwrap_err();
        assert!(matches!(err, DecodeError::Format(_)), "{err}");
    }
}

#[test]
fn truncated_png_fails_to_decode() {
    let png = solid_png(16, 16, [1, 2, 3]);
    let err = render_image_block(&png[..png.len() / 2], 10, 10).unwrap_err();
    assert!(matches!(err, DecodeError::Format(_)), "{err}");
}

#[test]
fn zero_bounds_are_rejected() {
    let png = solid_png(2, 2, [0, 0, 0]);
    assert!(matches!(
        render_image_block(&png, 0, 10),
        Err(DecodeError::EmptyBounds { width: 0, height: 10 })
    ));
    assert!(matches!(
        render_image_block(&png, 10, 0),
        Err(DecodeError::EmptyBounds { .. })
    ));
}

#[test]
fn oversized_bounds_are_rejected_before_resampling() {
    let png = solid_png(1, 1, [9, 9, 9]);
    let err = render_image_block(&png, 200_000, 200_000).unwrap_err();
    assert!(
        matches!(
            err,
            DecodeError::TooLarge {
                width: 200_000,
                height: 200_000,
                ..
            }
        ),
        "{err}"
    );
}

#[test]
fn large_but_reasonable_bounds_still_render() {
    let png = solid_png(4, 2, [9, 9, 9]);
    let out = render_image_block(&png, 400, 100).unwrap();
    assert_eq!((out.width, out.height, out.line_count), (400, 200, 100));
}
