use crate::error::ScreenshotError;

/// Bytes before the pixel data: file header (14) plus DIB header (40).
pub const HEADER_SIZE: usize = 54;

const DIB_HEADER_SIZE: u32 = 40;
const BITS_PER_PIXEL: u16 = 24;

/// Bytes per stored row for a 24-bit image: `width * 3` rounded up to a
/// multiple of 4. `None` on overflow.
pub fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .and_then(|r| r.checked_add(3))
        .map(|r| r & !3)
}

/// Geometry of a top-down 24-bit BMP.
///
/// All declared sizes derive from `width`, `height` and `row_stride`, so
/// the header always agrees with the rows the encoder streams.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub width: u32,
    pub height: u32,
    pub row_stride: usize,
}

impl BmpHeader {
    /// Fails with [`ScreenshotError::DimensionsTooLarge`] if the file size
    /// does not fit the 32-bit size field.
    pub fn new(width: u32, height: u32) -> Result<Self, ScreenshotError> {
        let too_large = ScreenshotError::DimensionsTooLarge { width, height };
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(too_large);
        }
        let row_stride = row_stride(width).ok_or(too_large)?;
        let header = Self {
            width,
            height,
            row_stride,
        };
        let fits = (row_stride as u64)
            .checked_mul(u64::from(height))
            .and_then(|n| n.checked_add(HEADER_SIZE as u64))
            .is_some_and(|n| n <= u64::from(u32::MAX));
        if !fits {
            return Err(ScreenshotError::DimensionsTooLarge { width, height });
        }
        Ok(header)
    }

    /// Padding bytes at the end of each row (0..=3).
    pub fn padding(&self) -> usize {
        self.row_stride - self.width as usize * 3
    }

    /// Pixel data size: `row_stride * height`.
    pub fn image_size(&self) -> u32 {
        (self.row_stride as u64 * u64::from(self.height)) as u32
    }

    /// Total file size: header plus pixel data.
    pub fn file_size(&self) -> u32 {
        HEADER_SIZE as u32 + self.image_size()
    }

    /// Serialize. Every multi-byte field is little-endian.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];

        // File header (14 bytes)
        out[0..2].copy_from_slice(b"BM");
        out[2..6].copy_from_slice(&self.file_size().to_le_bytes());
        // 6..10 reserved
        out[10..14].copy_from_slice(&(HEADER_SIZE as u32).to_le_bytes());

        // DIB header (BITMAPINFOHEADER, 40 bytes)
        out[14..18].copy_from_slice(&DIB_HEADER_SIZE.to_le_bytes());
        out[18..22].copy_from_slice(&(self.width as i32).to_le_bytes());
        out[22..26].copy_from_slice(&(-(self.height as i32)).to_le_bytes()); // negative = top-down
        out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
        out[28..30].copy_from_slice(&BITS_PER_PIXEL.to_le_bytes());
        // 30..34 compression = 0
        out[34..38].copy_from_slice(&self.image_size().to_le_bytes());
        // 38..54 resolution, colors used, important colors: all zero
        out
    }

    /// Read back a header this crate wrote.
    ///
    /// Returns `None` for anything else: other bit depths, bottom-up
    /// rows, compression, or sizes that disagree with the geometry.
    pub fn parse(data: &[u8]) -> Option<Self> {
        let data: &[u8; HEADER_SIZE] = data.get(..HEADER_SIZE)?.try_into().ok()?;
        let u16_at = |off: usize| u16::from_le_bytes([data[off], data[off + 1]]);
        let u32_at = |off: usize| {
            u32::from_le_bytes([data[off], data[off + 1], data[off + 2], data[off + 3]])
        };

        if &data[0..2] != b"BM"
            || u32_at(10) != HEADER_SIZE as u32
            || u32_at(14) != DIB_HEADER_SIZE
            || u16_at(26) != 1
            || u16_at(28) != BITS_PER_PIXEL
            || u32_at(30) != 0
        {
            return None;
        }

        let width = u32_at(18) as i32;
        let height = u32_at(22) as i32;
        if width <= 0 || height >= 0 || height == i32::MIN {
            return None;
        }
        let header = Self::new(width as u32, height.unsigned_abs()).ok()?;
        if u32_at(2) != header.file_size() || u32_at(34) != header.image_size() {
            return None;
        }
        Some(header)
    }
}
