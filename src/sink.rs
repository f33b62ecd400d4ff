//! Output sinks, the filesystem collaborator, and the scoped file guard.

use alloc::vec::Vec;

/// Append-only byte destination.
///
/// Object-safe; `&mut dyn Sink` works in generic code.
pub trait Sink {
    /// Append `bytes`, returning how many were accepted.
    ///
    /// A return value below `bytes.len()` is a short write. The capture
    /// treats it as fatal and never calls `append` again.
    fn append(&mut self, bytes: &[u8]) -> usize;

    /// Push buffered bytes to storage. `false` if they could not be.
    ///
    /// Called once after the last row, before the capture reports success.
    fn flush(&mut self) -> bool {
        true
    }

    /// Release the underlying handle. Called once by [`ScopedFile`] on drop.
    fn close(&mut self) {}
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn append(&mut self, bytes: &[u8]) -> usize {
        (**self).append(bytes)
    }

    fn flush(&mut self) -> bool {
        (**self).flush()
    }

    fn close(&mut self) {
        (**self).close()
    }
}

impl Sink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) -> usize {
        if self.try_reserve(bytes.len()).is_err() {
            return 0;
        }
        self.extend_from_slice(bytes);
        bytes.len()
    }
}

/// Storage-bus parameters forwarded untouched to the filesystem.
///
/// Host filesystems ignore them; SPI SD-card drivers use them to mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusConfig {
    /// Chip-select pin of the card slot.
    pub cs_pin: u8,
    /// SPI clock in Hz.
    pub frequency_hz: u32,
}

impl BusConfig {
    pub const DEFAULT_CS_PIN: u8 = 5;
    pub const DEFAULT_FREQUENCY_HZ: u32 = 4_000_000;
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            cs_pin: Self::DEFAULT_CS_PIN,
            frequency_hz: Self::DEFAULT_FREQUENCY_HZ,
        }
    }
}

/// Opens files for writing (create or truncate).
pub trait Filesystem {
    type File: Sink;

    /// Open `path` for writing. `None` if the storage is not mounted or the
    /// file cannot be created.
    fn open_write(&mut self, path: &str, bus: Option<BusConfig>) -> Option<Self::File>;
}

impl<F: Filesystem + ?Sized> Filesystem for &mut F {
    type File = F::File;

    fn open_write(&mut self, path: &str, bus: Option<BusConfig>) -> Option<Self::File> {
        (**self).open_write(path, bus)
    }
}

/// Exclusive owner of an open output file.
///
/// Closes the file when dropped, on every exit path. Not `Clone`; move it
/// or borrow it through [`get`](Self::get).
#[derive(Debug)]
pub struct ScopedFile<F: Sink> {
    file: F,
}

impl<F: Sink> ScopedFile<F> {
    /// Open `path` through `fs`. `None` if the open fails.
    pub fn open<Fs>(fs: &mut Fs, path: &str, bus: Option<BusConfig>) -> Option<Self>
    where
        Fs: Filesystem<File = F> + ?Sized,
    {
        fs.open_write(path, bus).map(Self::new)
    }

    /// Take ownership of an already-open sink.
    pub fn new(file: F) -> Self {
        Self { file }
    }

    pub fn get(&mut self) -> &mut F {
        &mut self.file
    }
}

impl<F: Sink> Drop for ScopedFile<F> {
    fn drop(&mut self) {
        self.file.close();
    }
}

#[cfg(feature = "std")]
pub use self::std_impl::{IoSink, StdFilesystem};

#[cfg(feature = "std")]
mod std_impl {
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};

    use super::{BusConfig, Filesystem, Sink};

    /// [`Sink`] over any [`io::Write`].
    ///
    /// Retries interrupted writes. Any other error ends the append early
    /// and is kept for [`take_error`](Self::take_error). A failed
    /// [`flush`](Sink::flush) fails the capture; errors from the final
    /// `close` flush cannot reach the caller once a capture has returned.
    #[derive(Debug)]
    pub struct IoSink<W: Write> {
        inner: W,
        error: Option<io::Error>,
    }

    impl<W: Write> IoSink<W> {
        pub fn new(inner: W) -> Self {
            Self { inner, error: None }
        }

        /// The I/O error behind the most recent short write or failed close.
        pub fn take_error(&mut self) -> Option<io::Error> {
            self.error.take()
        }

        pub fn get_ref(&self) -> &W {
            &self.inner
        }

        pub fn into_inner(self) -> W {
            self.inner
        }
    }

    impl<W: Write> Sink for IoSink<W> {
        fn append(&mut self, bytes: &[u8]) -> usize {
            let mut written = 0;
            while written < bytes.len() {
                match self.inner.write(&bytes[written..]) {
                    Ok(0) => {
                        self.error = Some(io::ErrorKind::WriteZero.into());
                        break;
                    }
                    Ok(n) => written += n,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                    Err(e) => {
                        self.error = Some(e);
                        break;
                    }
                }
            }
            written
        }

        fn flush(&mut self) -> bool {
            match self.inner.flush() {
                Ok(()) => true,
                Err(e) => {
                    self.error = Some(e);
                    false
                }
            }
        }

        fn close(&mut self) {
            self.flush();
        }
    }

    /// Host filesystem, optionally rooted at a directory.
    ///
    /// Paths are taken relative to the root with any leading `/` stripped,
    /// so card-style paths like `/shots/0001.bmp` work unchanged.
    #[derive(Clone, Debug, Default)]
    pub struct StdFilesystem {
        root: Option<PathBuf>,
    }

    impl StdFilesystem {
        /// Resolve paths against the process working directory.
        pub fn new() -> Self {
            Self::default()
        }

        pub fn rooted(root: impl Into<PathBuf>) -> Self {
            Self {
                root: Some(root.into()),
            }
        }

        fn resolve(&self, path: &str) -> PathBuf {
            match &self.root {
                Some(root) => root.join(path.trim_start_matches('/')),
                None => Path::new(path).to_path_buf(),
            }
        }
    }

    impl Filesystem for StdFilesystem {
        type File = IoSink<fs::File>;

        fn open_write(&mut self, path: &str, _bus: Option<BusConfig>) -> Option<Self::File> {
            fs::File::create(self.resolve(path)).ok().map(IoSink::new)
        }
    }
}
