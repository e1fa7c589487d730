//! Packed monochrome rasters
//!
//! One bit per pixel, rows top to bottom, MSB first, each row padded to a
//! whole byte. Level art and sprites both use this layout.

/// Errors building a [`MonoBitmap`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BitmapError {
    /// Width or height is zero
    #[error("bitmap dimensions must be non-zero, got {width}x{height}")]
    EmptyDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// Byte buffer does not match the dimensions
    #[error("bitmap of {width}x{height} needs {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Bytes required
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
}

/// Read-only packed 1-bit raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl MonoBitmap {
    /// Wrap packed bytes, checking the length against the dimensions
    pub fn new(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::EmptyDimensions { width, height });
        }
        let expected = Self::byte_width_for(width) * height as usize;
        if bytes.len() != expected {
            return Err(BitmapError::LengthMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            bytes,
        })
    }

    /// Build a raster by evaluating `solid(column, row)` for every pixel
    pub fn from_fn(
        width: u32,
        height: u32,
        mut solid: impl FnMut(u32, u32) -> bool,
    ) -> Result<Self, BitmapError> {
        if width == 0 || height == 0 {
            return Err(BitmapError::EmptyDimensions { width, height });
        }
        let byte_width = Self::byte_width_for(width);
        let mut bytes = vec![0u8; byte_width * height as usize];
        for row in 0..height {
            for column in 0..width {
                if solid(column, row) {
                    let index = row as usize * byte_width + column as usize / 8;
                    bytes[index] |= 0x80 >> (column & 7);
                }
            }
        }
        Self::new(width, height, bytes)
    }

    const fn byte_width_for(width: u32) -> usize {
        (width as usize + 7) / 8
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    pub const fn byte_width(&self) -> usize {
        Self::byte_width_for(self.width)
    }

    /// Raw packed bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the pixel at `(column, row)` is set; out of range reads as clear
    pub fn is_set(&self, column: u32, row: u32) -> bool {
        if column >= self.width || row >= self.height {
            return false;
        }
        let index = row as usize * self.byte_width() + column as usize / 8;
        self.bytes
            .get(index)
            .is_some_and(|byte| byte & (0x80 >> (column & 7)) != 0)
    }

    /// Every set pixel as `(column, row)`, row by row
    pub fn set_pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.height).flat_map(move |row| {
            (0..self.width)
                .filter(move |&column| self.is_set(column, row))
                .map(move |column| (column, row))
        })
    }

    /// Number of set pixels
    pub fn count_set(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first_layout() {
        let bitmap = MonoBitmap::new(10, 2, vec![0x80, 0x40, 0x01, 0x00]).unwrap();
        assert_eq!(bitmap.byte_width(), 2);
        assert!(bitmap.is_set(0, 0));
        assert!(bitmap.is_set(9, 0));
        assert!(bitmap.is_set(7, 1));
        assert!(!bitmap.is_set(1, 0));
        assert!(!bitmap.is_set(10, 0));
        assert_eq!(bitmap.set_pixels().collect::<Vec<_>>(), vec![(0, 0), (9, 0), (7, 1)]);
    }

    #[test]
    fn test_from_fn_matches_predicate() {
        let bitmap = MonoBitmap::from_fn(12, 3, |c, r| c == r * 4).unwrap();
        assert_eq!(bitmap.count_set(), 3);
        assert!(bitmap.is_set(8, 2));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = MonoBitmap::new(128, 128, vec![0; 10]).unwrap_err();
        assert_eq!(
            err,
            BitmapError::LengthMismatch {
                width: 128,
                height: 128,
                expected: 2048,
                actual: 10
            }
        );
        assert!(MonoBitmap::new(0, 4, Vec::new()).is_err());
    }
}
