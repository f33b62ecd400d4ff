use alloc::string::String;
use enough::StopReason;

/// Errors from a screenshot capture.
///
/// Every variant is terminal. Nothing is retried and a partially written
/// file is left on the sink as-is.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ScreenshotError {
    #[error("Only 16-bit color depth supported (surface is {bits}-bit)")]
    UnsupportedColorDepth { bits: u8 },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Display does not support readPixel()")]
    DisplayNotReadable,

    #[error("Row buffer allocation failed ({bytes} bytes)")]
    PixelBufferAllocFailed { bytes: usize },

    #[error("Output buffer allocation failed ({bytes} bytes)")]
    OutputBufferAllocFailed { bytes: usize },

    #[error("SD Card mount or file open failed")]
    FileOpenFailed,

    #[error("Failed to write bmp header: wrote {written} of {expected} bytes")]
    WriteHeaderFailed { written: usize, expected: usize },

    #[error("Failed to write pixel data at row {row}: wrote {written} of {expected} bytes")]
    WritePixelDataFailed {
        row: u32,
        written: usize,
        expected: usize,
    },

    #[error("Failed to flush pixel data")]
    FlushFailed,

    #[error("Dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Operation cancelled")]
    Cancelled(StopReason),
}

/// Fieldless classification of a [`ScreenshotError`].
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnsupportedColorDepth,
    InvalidDimensions,
    DisplayNotReadable,
    PixelBufferAllocFailed,
    OutputBufferAllocFailed,
    FileOpenFailed,
    WriteHeaderFailed,
    WritePixelDataFailed,
    FlushFailed,
    DimensionsTooLarge,
    LimitExceeded,
    Cancelled,
}

impl ScreenshotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedColorDepth { .. } => ErrorKind::UnsupportedColorDepth,
            Self::InvalidDimensions { .. } => ErrorKind::InvalidDimensions,
            Self::DisplayNotReadable => ErrorKind::DisplayNotReadable,
            Self::PixelBufferAllocFailed { .. } => ErrorKind::PixelBufferAllocFailed,
            Self::OutputBufferAllocFailed { .. } => ErrorKind::OutputBufferAllocFailed,
            Self::FileOpenFailed => ErrorKind::FileOpenFailed,
            Self::WriteHeaderFailed { .. } => ErrorKind::WriteHeaderFailed,
            Self::WritePixelDataFailed { .. } => ErrorKind::WritePixelDataFailed,
            Self::FlushFailed => ErrorKind::FlushFailed,
            Self::DimensionsTooLarge { .. } => ErrorKind::DimensionsTooLarge,
            Self::LimitExceeded(_) => ErrorKind::LimitExceeded,
            Self::Cancelled(_) => ErrorKind::Cancelled,
        }
    }
}

impl From<StopReason> for ScreenshotError {
    fn from(r: StopReason) -> Self {
        ScreenshotError::Cancelled(r)
    }
}
