//! Gbapp error handling.

use std::fmt;
use std::io::Error as IoError;

/// A specialized [`Result`] type for window and WGL operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all the window system and WGL operations.
#[derive(Debug, Clone)]
pub struct Error {
    /// The raw code of the underlying error.
    raw_code: Option<i64>,

    /// The raw message from the os in case it could be obtained.
    raw_os_message: Option<String>,

    /// The platform call that failed.
    kind: ErrorKind,
}

impl Error {
    pub(crate) fn new(
        raw_code: Option<i64>,
        raw_os_message: Option<String>,
        kind: ErrorKind,
    ) -> Self {
        Self { raw_code, raw_os_message, kind }
    }

    /// Capture the calling thread's last OS error and attribute it to `kind`.
    #[allow(dead_code)]
    pub(crate) fn last_os_error(kind: ErrorKind) -> Self {
        Self::from_io(IoError::last_os_error(), kind)
    }

    pub(crate) fn from_io(error: IoError, kind: ErrorKind) -> Self {
        Self::new(error.raw_os_error().map(i64::from), Some(error.to_string()), kind)
    }

    #[allow(dead_code)]
    pub(crate) fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::new(None, Some(message.into()), kind)
    }

    /// Helper to check that error is [`ErrorKind::NotSupported`].
    #[inline]
    pub fn not_supported(&self) -> bool {
        matches!(&self.kind, ErrorKind::NotSupported(_))
    }

    /// The underlying error kind.
    #[inline]
    pub fn error_kind(&self) -> ErrorKind {
        self.kind
    }

    /// The underlying raw code in case it's present.
    #[inline]
    pub fn raw_code(&self) -> Option<i64> {
        self.raw_code
    }

    /// The message reported by the OS or loader, if any.
    #[inline]
    pub fn raw_os_message(&self) -> Option<&str> {
        self.raw_os_message.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw_code) = self.raw_code {
            write!(f, "[{raw_code:x}] ")?;
        }

        write!(f, "{}", self.kind)?;

        if let Some(raw_os_message) = self.raw_os_message.as_ref() {
            write!(f, ": {raw_os_message}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {}

/// Build an error with just a kind.
impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error { raw_code: None, raw_os_message: None, kind }
    }
}

/// One variant per platform or driver call that can fail.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid arguments were passed, or the target resource was already
    /// released.
    InvalidArgs,

    /// `RegisterClassW` failed.
    RegisterClassFailed,

    /// `UnregisterClassW` failed.
    UnregisterClassFailed,

    /// `AdjustWindowRect` failed.
    AdjustWindowRectFailed,

    /// `CreateWindowExW` failed.
    CreateWindowFailed,

    /// `GetDC` failed to hand out the drawing surface.
    GetDcFailed,

    /// `SwapBuffers` failed.
    SwapBuffersFailed,

    /// `opengl32.dll` couldn't be loaded.
    LoadLibraryFailed,

    /// A base WGL entry point is missing from `opengl32.dll`.
    ResolveSymbolFailed,

    /// `ChoosePixelFormat` found nothing suitable.
    ChoosePixelFormatFailed,

    /// `SetPixelFormat` failed.
    SetPixelFormatFailed,

    /// The driver refused to create a rendering context.
    CreateContextFailed,

    /// `wglMakeCurrent` failed.
    MakeCurrentFailed,

    /// A required WGL extension function couldn't be resolved.
    LoadExtensionFailed,

    /// `wglSwapIntervalEXT` failed.
    SwapIntervalFailed,

    /// `wglGetPixelFormatAttribivARB` failed.
    PixelFormatQueryFailed,

    /// The operation is not supported by the driver.
    NotSupported(&'static str),
}

impl ErrorKind {
    pub(crate) fn as_str(&self) -> &'static str {
        use ErrorKind::*;
        match *self {
            InvalidArgs => "invalid arguments",
            RegisterClassFailed => "failed to register the window class",
            UnregisterClassFailed => "failed to unregister the window class",
            AdjustWindowRectFailed => "failed to adjust the window rectangle",
            CreateWindowFailed => "failed to create a window",
            GetDcFailed => "failed to get the window device context",
            SwapBuffersFailed => "failed to swap buffers",
            LoadLibraryFailed => "failed to load opengl32.dll",
            ResolveSymbolFailed => "failed to resolve a WGL entry point",
            ChoosePixelFormatFailed => "no matching pixel format",
            SetPixelFormatFailed => "failed to set the pixel format",
            CreateContextFailed => "failed to create a rendering context",
            MakeCurrentFailed => "failed to make the rendering context current",
            LoadExtensionFailed => "failed to load a WGL extension function",
            SwapIntervalFailed => "failed to set the swap interval",
            PixelFormatQueryFailed => "failed to query pixel format attributes",
            NotSupported(reason) => reason,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_only_display() {
        let error = Error::from(ErrorKind::GetDcFailed);
        assert_eq!(error.to_string(), "failed to get the window device context");
        assert_eq!(error.raw_code(), None);
        assert!(!error.not_supported());
    }

    #[test]
    fn os_error_display_carries_code_and_message() {
        let error = Error::new(
            Some(0x57),
            Some("The parameter is incorrect.".into()),
            ErrorKind::CreateWindowFailed,
        );
        assert_eq!(
            error.to_string(),
            "[57] failed to create a window: The parameter is incorrect."
        );
        assert_eq!(error.error_kind(), ErrorKind::CreateWindowFailed);
    }

    #[test]
    fn io_errors_keep_their_code() {
        let io = IoError::from_raw_os_error(5);
        let error = Error::from_io(io, ErrorKind::RegisterClassFailed);
        assert_eq!(error.raw_code(), Some(5));
        assert!(error.raw_os_message().is_some());
    }

    #[test]
    fn not_supported_reason_is_the_message() {
        let error = Error::from(ErrorKind::NotSupported("WGL_EXT_swap_control is not supported"));
        assert!(error.not_supported());
        assert_eq!(error.to_string(), "WGL_EXT_swap_control is not supported");
    }
}
