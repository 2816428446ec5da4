//! Real rendering contexts created with the loaded WGL functions.

use std::fmt;
use std::marker::PhantomData;
use std::os::raw::c_int;
use std::ptr;

use glutin_wgl_sys::wgl_extra;
use log::{debug, warn};
use windows_sys::Win32::Graphics::OpenGL::HGLRC;

use crate::config::{ContextAttributes, GlProfile, PixelFormatAttributes, SwapInterval};
use crate::error::{Error, ErrorKind, Result};
use crate::extensions::Capabilities;

use super::loader::Wgl;
use super::pixel_format;
use super::window::Window;

impl Wgl {
    /// Choose a pixel format matching `attributes` and set it on the window's
    /// surface. Returns the pixel format index.
    ///
    /// The pixel format of a window can be set only once.
    pub fn set_pixel_format(
        &self,
        window: &Window<'_>,
        attributes: &PixelFormatAttributes,
    ) -> Result<c_int> {
        window.check_alive()?;
        pixel_format::apply(window.surface(), attributes)
    }

    /// Create a rendering context for the window's surface.
    ///
    /// Uses `wglCreateContextAttribsARB` when the driver has
    /// `WGL_ARB_create_context`, falling back to `wglCreateContext` otherwise.
    /// The fallback can't honour a version, profile or debug request, so those
    /// fail with [`ErrorKind::NotSupported`] there.
    pub fn create_context(
        &self,
        window: &Window<'_>,
        attributes: &ContextAttributes,
    ) -> Result<Context<'_>> {
        window.check_alive()?;
        let hdc = window.surface();

        attributes.check_supported(self.capabilities)?;

        let raw = if self.capabilities.contains(Capabilities::CREATE_CONTEXT) {
            let attrs = arb_attrib_list(attributes);
            unsafe {
                self.extra.CreateContextAttribsARB(hdc as *const _, ptr::null(), attrs.as_ptr())
                    as HGLRC
            }
        } else {
            unsafe { (self.base.create_context)(hdc) }
        };

        if raw == 0 {
            return Err(Error::last_os_error(ErrorKind::CreateContextFailed));
        }

        debug!("created context {raw:#x} with {attributes:?}");
        Ok(Context { wgl: self, raw, _nosendsync: PhantomData })
    }

    /// Detach whatever context is current on the calling thread.
    pub fn make_not_current(&self) -> Result<()> {
        if unsafe { (self.base.make_current)(0, 0) } == 0 {
            return Err(Error::last_os_error(ErrorKind::MakeCurrentFailed));
        }

        Ok(())
    }

    /// Set the swap interval of the context current on the calling thread.
    pub fn set_swap_interval(&self, interval: SwapInterval) -> Result<()> {
        if !self.capabilities.contains(Capabilities::SWAP_CONTROL) {
            return Err(ErrorKind::NotSupported("WGL_EXT_swap_control is not supported").into());
        }

        if unsafe { self.extra.SwapIntervalEXT(interval.as_raw()) } == 0 {
            return Err(Error::last_os_error(ErrorKind::SwapIntervalFailed));
        }

        Ok(())
    }

    /// Query `attributes` of the given pixel format on the window's surface,
    /// one value per attribute.
    pub fn pixel_format_attribs(
        &self,
        window: &Window<'_>,
        pixel_format: c_int,
        attributes: &[c_int],
    ) -> Result<Vec<c_int>> {
        window.check_alive()?;
        if !self.capabilities.contains(Capabilities::PIXEL_FORMAT) {
            return Err(ErrorKind::NotSupported("WGL_ARB_pixel_format is not supported").into());
        }

        if attributes.is_empty() || pixel_format <= 0 {
            return Err(ErrorKind::InvalidArgs.into());
        }

        let mut values = vec![0; attributes.len()];
        let result = unsafe {
            self.extra.GetPixelFormatAttribivARB(
                window.surface() as *const _,
                pixel_format,
                0,
                attributes.len() as _,
                attributes.as_ptr(),
                values.as_mut_ptr(),
            )
        };

        if result == 0 {
            return Err(Error::last_os_error(ErrorKind::PixelFormatQueryFailed));
        }

        Ok(values)
    }
}

/// Build the zero terminated attribute list for `wglCreateContextAttribsARB`.
fn arb_attrib_list(attributes: &ContextAttributes) -> Vec<c_int> {
    let mut attrs = Vec::<c_int>::with_capacity(9);

    if let Some(version) = attributes.version() {
        attrs.push(wgl_extra::CONTEXT_MAJOR_VERSION_ARB as c_int);
        attrs.push(version.major as c_int);
        attrs.push(wgl_extra::CONTEXT_MINOR_VERSION_ARB as c_int);
        attrs.push(version.minor as c_int);
    }

    if let Some(profile) = attributes.profile() {
        let profile = match profile {
            GlProfile::Core => wgl_extra::CONTEXT_CORE_PROFILE_BIT_ARB,
            GlProfile::Compatibility => wgl_extra::CONTEXT_COMPATIBILITY_PROFILE_BIT_ARB,
        };

        attrs.push(wgl_extra::CONTEXT_PROFILE_MASK_ARB as c_int);
        attrs.push(profile as c_int);
    }

    if attributes.debug() {
        attrs.push(wgl_extra::CONTEXT_FLAGS_ARB as c_int);
        attrs.push(wgl_extra::CONTEXT_DEBUG_BIT_ARB as c_int);
    }

    // Terminate list with zero.
    attrs.push(0);

    attrs
}

/// A rendering context. Deleted on drop.
pub struct Context<'a> {
    wgl: &'a Wgl,
    raw: HGLRC,
    // The context could be current only on the one thread.
    _nosendsync: PhantomData<*const ()>,
}

impl Context<'_> {
    /// Make the context current on the calling thread, drawing to `window`.
    ///
    /// The window must have the pixel format the context was created with.
    pub fn make_current(&self, window: &Window<'_>) -> Result<()> {
        window.check_alive()?;

        if unsafe { (self.wgl.base.make_current)(window.surface(), self.raw) } == 0 {
            return Err(Error::last_os_error(ErrorKind::MakeCurrentFailed));
        }

        Ok(())
    }

    /// The raw `HGLRC`.
    pub fn raw(&self) -> HGLRC {
        self.raw
    }
}

impl Drop for Context<'_> {
    fn drop(&mut self) {
        // Deleting a current context makes it not current first.
        if unsafe { (self.wgl.base.delete_context)(self.raw) } == 0 {
            warn!("failed to delete context {:#x}: {}", self.raw, std::io::Error::last_os_error());
        }
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context").field("raw", &self.raw).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::{ContextAttributesBuilder, Version};

    #[test]
    fn empty_arb_list_is_just_the_terminator() {
        assert_eq!(arb_attrib_list(&ContextAttributes::default()), vec![0]);
    }

    #[test]
    fn full_arb_list() {
        let attributes = ContextAttributesBuilder::new()
            .with_version(Version::new(3, 3))
            .with_profile(GlProfile::Core)
            .with_debug(true)
            .build();

        assert_eq!(arb_attrib_list(&attributes), vec![
            0x2091, 3, 0x2092, 3, 0x9126, 0x1, 0x2094, 0x1, 0
        ]);
    }
}
