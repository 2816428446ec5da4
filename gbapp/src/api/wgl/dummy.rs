//! The throwaway window and context used by the WGL bootstrap.

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::ptr;

use log::warn;
use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::Graphics::Gdi::{self as gdi, HDC};
use windows_sys::Win32::Graphics::OpenGL::HGLRC;
use windows_sys::Win32::UI::WindowsAndMessaging::{self as wm, CreateWindowExW, DestroyWindow};

use crate::bootstrap::BootstrapHost;
use crate::config::PixelFormatAttributes;
use crate::error::{Error, ErrorKind, Result};
use crate::extensions::ExtensionStrings;

use super::app::App;
use super::ffi;
use super::loader::{BaseFunctions, ExtensionFunctions};
use super::pixel_format;
use super::window;

/// Drives the bootstrap with real Win32 and WGL calls.
pub(crate) struct DummyHost<'a> {
    app: &'a App,
    base: &'a BaseFunctions,
}

impl<'a> DummyHost<'a> {
    pub(crate) fn new(app: &'a App, base: &'a BaseFunctions) -> Self {
        Self { app, base }
    }
}

/// An invisible zero sized window. It isn't registered for message routing,
/// so everything it receives goes to the default window procedure.
pub(crate) struct DummyWindow {
    hwnd: HWND,
    hdc: HDC,
}

impl Drop for DummyWindow {
    fn drop(&mut self) {
        unsafe {
            if self.hdc != 0 {
                gdi::ReleaseDC(self.hwnd, self.hdc);
            }

            if DestroyWindow(self.hwnd) == 0 {
                warn!("failed to destroy the dummy window: {}", std::io::Error::last_os_error());
            }
        }
    }
}

pub(crate) struct DummyContext {
    raw: HGLRC,
    delete_context: ffi::DeleteContext,
}

impl Drop for DummyContext {
    fn drop(&mut self) {
        if unsafe { (self.delete_context)(self.raw) } == 0 {
            warn!("failed to delete the dummy context: {}", std::io::Error::last_os_error());
        }
    }
}

pub(crate) struct DummyCurrent {
    make_current: ffi::MakeCurrent,
    get_proc_address: ffi::GetProcAddress,
}

impl Drop for DummyCurrent {
    fn drop(&mut self) {
        if unsafe { (self.make_current)(0, 0) } == 0 {
            warn!("failed to detach the dummy context: {}", std::io::Error::last_os_error());
        }
    }
}

impl BootstrapHost for DummyHost<'_> {
    type Context = DummyContext;
    type Current = DummyCurrent;
    type Functions = ExtensionFunctions;
    type Window = DummyWindow;

    fn create_window(&self) -> Result<DummyWindow> {
        let title = [0u16];
        let hwnd = unsafe {
            CreateWindowExW(
                0,
                self.app.class_name_ptr(),
                title.as_ptr(),
                wm::WS_POPUP | wm::WS_CLIPSIBLINGS | wm::WS_CLIPCHILDREN,
                0,
                0,
                0,
                0,
                0,
                0,
                self.app.instance(),
                ptr::null(),
            )
        };
        if hwnd == 0 {
            return Err(Error::last_os_error(ErrorKind::CreateWindowFailed));
        }

        let mut dummy = DummyWindow { hwnd, hdc: 0 };
        dummy.hdc = unsafe { gdi::GetDC(hwnd) };
        if dummy.hdc == 0 {
            return Err(Error::last_os_error(ErrorKind::GetDcFailed));
        }

        window::drain_messages(hwnd);
        Ok(dummy)
    }

    fn choose_pixel_format(&self, window: &DummyWindow) -> Result<c_int> {
        pixel_format::choose(window.hdc, &PixelFormatAttributes::default())
    }

    fn set_pixel_format(&self, window: &DummyWindow, pixel_format: c_int) -> Result<()> {
        pixel_format::set(window.hdc, pixel_format)
    }

    fn create_context(&self, window: &DummyWindow) -> Result<DummyContext> {
        let raw = unsafe { (self.base.create_context)(window.hdc) };
        if raw == 0 {
            return Err(Error::last_os_error(ErrorKind::CreateContextFailed));
        }

        Ok(DummyContext { raw, delete_context: self.base.delete_context })
    }

    fn make_current(&self, window: &DummyWindow, context: &DummyContext) -> Result<DummyCurrent> {
        if unsafe { (self.base.make_current)(window.hdc, context.raw) } == 0 {
            return Err(Error::last_os_error(ErrorKind::MakeCurrentFailed));
        }

        Ok(DummyCurrent {
            make_current: self.base.make_current,
            get_proc_address: self.base.get_proc_address,
        })
    }

    fn load_functions(&self, current: &DummyCurrent) -> Result<ExtensionFunctions> {
        unsafe { ExtensionFunctions::load(current.get_proc_address) }
    }

    fn extension_strings(
        &self,
        window: &DummyWindow,
        functions: &ExtensionFunctions,
    ) -> ExtensionStrings {
        unsafe {
            let ext = functions.GetExtensionsStringEXT();
            let arb = functions.GetExtensionsStringARB(window.hdc as *const _);
            ExtensionStrings::new(owned_or_empty(ext, "EXT"), owned_or_empty(arb, "ARB"))
        }
    }
}

/// # Safety
///
/// `raw` must be null or point to a NUL terminated string.
unsafe fn owned_or_empty(raw: *const c_char, which: &str) -> String {
    if raw.is_null() {
        warn!("wglGetExtensionsString{which} returned null");
        return String::new();
    }

    CStr::from_ptr(raw).to_string_lossy().into_owned()
}
