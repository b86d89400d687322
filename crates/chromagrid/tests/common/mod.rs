#![allow(dead_code)]

use chromagrid::{ColorGrid, ColorLabel};

/// 10x10 cell layout: 2x2 black marker pieces at the corners of a frame
/// spanning rows 2..=8 and columns 1..=9, white background, a checker of
/// palette colors inside.
pub fn framed_cells() -> ColorGrid {
    let mut grid = ColorGrid::filled(10, 10, ColorLabel::White).expect("grid");
    for (x0, y0) in [(1, 2), (8, 2), (1, 7), (8, 7)] {
        for dy in 0..2 {
            for dx in 0..2 {
                grid.set(x0 + dx, y0 + dy, ColorLabel::Black);
            }
        }
    }
    for y in 4..7 {
        for x in 3..8 {
            grid.set(x, y, ColorLabel::PALETTE[(x + y) % 4]);
        }
    }
    grid
}

/// Paint every cell of `cells` as a `scale × scale` block of its canonical color.
pub fn paint(cells: &ColorGrid, scale: u32) -> image::RgbaImage {
    image::RgbaImage::from_fn(
        cells.width() as u32 * scale,
        cells.height() as u32 * scale,
        |x, y| {
            let label = cells
                .get((x / scale) as usize, (y / scale) as usize)
                .unwrap_or_default();
            image::Rgba(label.rgba())
        },
    )
}
