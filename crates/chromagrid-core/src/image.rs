/// Borrowed RGBA8 pixel buffer, row-major, 4 bytes per pixel.
#[derive(Clone, Copy, Debug)]
pub struct RgbaImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // len = w*h*4
}

pub const RGBA_CHANNELS: usize = 4;

impl<'a> RgbaImageView<'a> {
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Buffer length implied by the dimensions, `None` on overflow.
    #[inline]
    pub fn expected_len(&self) -> Option<usize> {
        self.width
            .checked_mul(self.height)?
            .checked_mul(RGBA_CHANNELS)
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * RGBA_CHANNELS;
        let px = self.data.get(i..i + RGBA_CHANNELS)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Row-major pixel iterator; a trailing partial pixel is ignored.
    pub fn pixels(&self) -> impl Iterator<Item = &'a [u8]> {
        self.data.chunks_exact(RGBA_CHANNELS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_lookup_is_row_major() {
        let mut data = vec![0u8; 3 * 2 * 4];
        let at = (3 + 2) * 4; // (x=2, y=1)
        data[at..at + 4].copy_from_slice(&[10, 20, 30, 40]);
        let view = RgbaImageView::new(3, 2, &data);
        assert_eq!(view.pixel(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(view.pixel(3, 0), None);
        assert_eq!(view.expected_len(), Some(24));
        assert_eq!(view.pixels().count(), 6);
    }
}
