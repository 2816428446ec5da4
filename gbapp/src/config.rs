//! Attributes for the application, its windows, pixel formats and contexts.

use std::num::NonZeroU32;
use std::os::raw::c_int;

use crate::error::{ErrorKind, Result};
use crate::extensions::Capabilities;

/// The window class registered by [`AppAttributes::default`].
pub const DEFAULT_CLASS_NAME: &str = "GBAPP_WIN32";

/// The title used by [`WindowAttributes::default`].
pub const DEFAULT_TITLE: &str = "GB Window";

/// Attributes of the application context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppAttributes {
    pub(crate) class_name: String,
}

impl AppAttributes {
    /// The window class name shared by every window of the application.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Check that the class name can be registered.
    pub fn validate(&self) -> Result<()> {
        if self.class_name.is_empty() || self.class_name.contains('\0') {
            return Err(ErrorKind::InvalidArgs.into());
        }

        Ok(())
    }
}

impl Default for AppAttributes {
    fn default() -> Self {
        Self { class_name: DEFAULT_CLASS_NAME.to_owned() }
    }
}

/// Builder for [`AppAttributes`].
#[derive(Default, Debug, Clone)]
pub struct AppAttributesBuilder {
    attributes: AppAttributes,
}

impl AppAttributesBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the window class name.
    ///
    /// By default `GBAPP_WIN32` is used.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.attributes.class_name = class_name.into();
        self
    }

    pub fn build(self) -> AppAttributes {
        self.attributes
    }
}

/// How presenting interacts with the desktop compositor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositorSync {
    /// Plain `SwapBuffers`, leaving pacing to the driver.
    #[default]
    Driver,

    /// Follow `SwapBuffers` with `DwmFlush` whenever desktop composition is
    /// enabled, so that presentation lines up with the compositor.
    DwmFlush,
}

/// Attributes used when creating a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowAttributes {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) title: String,
    pub(crate) compositor_sync: CompositorSync,
}

impl WindowAttributes {
    /// Client area width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Client area height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The window title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// How presenting interacts with the compositor.
    pub fn compositor_sync(&self) -> CompositorSync {
        self.compositor_sync
    }

    /// Check that the attributes describe a window the OS can create.
    ///
    /// Both dimensions must be non-zero and fit into the signed coordinates
    /// Win32 uses; the title must not contain NUL.
    pub fn validate(&self) -> Result<()> {
        let fits = |value: u32| value != 0 && value <= i32::MAX as u32;
        if !fits(self.width) || !fits(self.height) || self.title.contains('\0') {
            return Err(ErrorKind::InvalidArgs.into());
        }

        Ok(())
    }
}

impl Default for WindowAttributes {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            title: DEFAULT_TITLE.to_owned(),
            compositor_sync: CompositorSync::default(),
        }
    }
}

/// Builder for [`WindowAttributes`].
#[derive(Default, Debug, Clone)]
pub struct WindowAttributesBuilder {
    attributes: WindowAttributes,
}

impl WindowAttributesBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the client area size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.attributes.width = width;
        self.attributes.height = height;
        self
    }

    /// Sets the window title.
    ///
    /// By default `GB Window` is used.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.attributes.title = title.into();
        self
    }

    /// Sets how `Window::swap_buffers` behaves under desktop composition.
    pub fn with_compositor_sync(mut self, compositor_sync: CompositorSync) -> Self {
        self.attributes.compositor_sync = compositor_sync;
        self
    }

    pub fn build(self) -> WindowAttributes {
        self.attributes
    }
}

/// Requirements for the pixel format of a window surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormatAttributes {
    pub(crate) color_bits: u8,
    pub(crate) alpha_bits: u8,
    pub(crate) depth_bits: u8,
    pub(crate) stencil_bits: u8,
    pub(crate) double_buffer: bool,
}

impl PixelFormatAttributes {
    /// Color bits, excluding alpha.
    pub fn color_bits(&self) -> u8 {
        self.color_bits
    }

    /// Alpha bits.
    pub fn alpha_bits(&self) -> u8 {
        self.alpha_bits
    }

    /// Depth buffer bits.
    pub fn depth_bits(&self) -> u8 {
        self.depth_bits
    }

    /// Stencil buffer bits.
    pub fn stencil_bits(&self) -> u8 {
        self.stencil_bits
    }

    /// Whether the surface is double buffered.
    pub fn double_buffer(&self) -> bool {
        self.double_buffer
    }
}

impl Default for PixelFormatAttributes {
    fn default() -> Self {
        Self { color_bits: 24, alpha_bits: 8, depth_bits: 24, stencil_bits: 8, double_buffer: true }
    }
}

/// Builder for [`PixelFormatAttributes`].
#[derive(Default, Debug, Clone)]
pub struct PixelFormatAttributesBuilder {
    attributes: PixelFormatAttributes,
}

impl PixelFormatAttributesBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Color bits excluding alpha. By default `24`.
    pub fn with_color_bits(mut self, bits: u8) -> Self {
        self.attributes.color_bits = bits;
        self
    }

    /// Alpha bits. By default `8`.
    pub fn with_alpha_bits(mut self, bits: u8) -> Self {
        self.attributes.alpha_bits = bits;
        self
    }

    /// Depth buffer bits. By default `24`.
    pub fn with_depth_bits(mut self, bits: u8) -> Self {
        self.attributes.depth_bits = bits;
        self
    }

    /// Stencil buffer bits. By default `8`.
    pub fn with_stencil_bits(mut self, bits: u8) -> Self {
        self.attributes.stencil_bits = bits;
        self
    }

    /// Request a double buffered surface. On by default.
    pub fn with_double_buffer(mut self, double_buffer: bool) -> Self {
        self.attributes.double_buffer = double_buffer;
        self
    }

    pub fn build(self) -> PixelFormatAttributes {
        self.attributes
    }
}

/// The OpenGL profile to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlProfile {
    /// Core profile, deprecated functionality removed.
    Core,
    /// Compatibility profile.
    Compatibility,
}

/// An OpenGL version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

/// Attributes of a rendering context.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContextAttributes {
    pub(crate) version: Option<Version>,
    pub(crate) profile: Option<GlProfile>,
    pub(crate) debug: bool,
}

impl ContextAttributes {
    /// The requested version, if any.
    pub fn version(&self) -> Option<Version> {
        self.version
    }

    /// The requested profile, if any.
    pub fn profile(&self) -> Option<GlProfile> {
        self.profile
    }

    /// Whether a debug context was requested.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Whether anything beyond what `wglCreateContext` offers was requested.
    pub fn needs_arb(&self) -> bool {
        self.version.is_some() || self.profile.is_some() || self.debug
    }

    /// Check that the driver can honour the request.
    ///
    /// A version or debug flag needs `WGL_ARB_create_context`, a profile also
    /// needs `WGL_ARB_create_context_profile`.
    pub fn check_supported(&self, capabilities: Capabilities) -> Result<()> {
        if self.needs_arb() && !capabilities.contains(Capabilities::CREATE_CONTEXT) {
            return Err(ErrorKind::NotSupported("WGL_ARB_create_context is not supported").into());
        }

        if self.profile.is_some() && !capabilities.contains(Capabilities::CREATE_CONTEXT_PROFILE) {
            return Err(ErrorKind::NotSupported(
                "WGL_ARB_create_context_profile is not supported",
            )
            .into());
        }

        Ok(())
    }
}

/// Builder for [`ContextAttributes`].
#[derive(Default, Debug, Clone)]
pub struct ContextAttributesBuilder {
    attributes: ContextAttributes,
}

impl ContextAttributesBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Request a specific OpenGL version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.attributes.version = Some(version);
        self
    }

    /// Request a profile. Needs `WGL_ARB_create_context_profile`.
    pub fn with_profile(mut self, profile: GlProfile) -> Self {
        self.attributes.profile = Some(profile);
        self
    }

    /// Request a debug context.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.attributes.debug = debug;
        self
    }

    pub fn build(self) -> ContextAttributes {
        self.attributes
    }
}

/// The swap interval to set with `wglSwapIntervalEXT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwapInterval {
    /// Present without waiting for vertical blank.
    DontWait,

    /// Wait for the given number of vertical blanks before presenting.
    Wait(NonZeroU32),
}

impl SwapInterval {
    /// The value handed to the driver.
    pub fn as_raw(self) -> c_int {
        match self {
            SwapInterval::DontWait => 0,
            SwapInterval::Wait(frames) => frames.get().min(c_int::MAX as u32) as c_int,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let app = AppAttributes::default();
        assert_eq!(app.class_name(), "GBAPP_WIN32");

        let window = WindowAttributes::default();
        assert_eq!((window.width(), window.height()), (640, 480));
        assert_eq!(window.title(), "GB Window");
        assert_eq!(window.compositor_sync(), CompositorSync::Driver);
    }

    #[test]
    fn window_validation() {
        assert!(WindowAttributesBuilder::new().with_size(1, 1).build().validate().is_ok());

        for (width, height) in [(0, 480), (640, 0), (u32::MAX, 480)] {
            let err = WindowAttributesBuilder::new()
                .with_size(width, height)
                .build()
                .validate()
                .unwrap_err();
            assert_eq!(err.error_kind(), ErrorKind::InvalidArgs);
        }

        let err = WindowAttributesBuilder::new().with_title("a\0b").build().validate().unwrap_err();
        assert_eq!(err.error_kind(), ErrorKind::InvalidArgs);
    }

    #[test]
    fn class_name_validation() {
        assert!(AppAttributesBuilder::new().with_class_name("Mine").build().validate().is_ok());
        assert!(AppAttributesBuilder::new().with_class_name("").build().validate().is_err());
        assert!(AppAttributesBuilder::new().with_class_name("a\0").build().validate().is_err());
    }

    #[test]
    fn plain_request_works_everywhere() {
        let attributes = ContextAttributes::default();
        assert!(!attributes.needs_arb());
        assert!(attributes.check_supported(Capabilities::empty()).is_ok());
    }

    #[test]
    fn version_and_debug_need_create_context() {
        let attributes = ContextAttributesBuilder::new().with_version(Version::new(3, 3)).build();
        assert!(attributes.check_supported(Capabilities::empty()).unwrap_err().not_supported());
        assert!(attributes.check_supported(Capabilities::CREATE_CONTEXT).is_ok());

        let attributes = ContextAttributesBuilder::new().with_debug(true).build();
        assert!(attributes.needs_arb());
        assert!(attributes.check_supported(Capabilities::SWAP_CONTROL).is_err());
    }

    #[test]
    fn profile_needs_the_profile_extension() {
        let attributes =
            ContextAttributesBuilder::new().with_profile(GlProfile::Compatibility).build();
        let err = attributes.check_supported(Capabilities::CREATE_CONTEXT).unwrap_err();
        assert!(err.not_supported());

        let caps = Capabilities::CREATE_CONTEXT | Capabilities::CREATE_CONTEXT_PROFILE;
        assert!(attributes.check_supported(caps).is_ok());
    }

    #[test]
    fn swap_interval_values() {
        assert_eq!(SwapInterval::DontWait.as_raw(), 0);
        assert_eq!(SwapInterval::Wait(NonZeroU32::new(2).unwrap()).as_raw(), 2);
        assert_eq!(SwapInterval::Wait(NonZeroU32::new(u32::MAX).unwrap()).as_raw(), c_int::MAX);
    }
}
