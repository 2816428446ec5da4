//! The application context and its window class.

use std::fmt;
use std::marker::PhantomData;
use std::ptr;

use log::{debug, warn};
use windows_sys::core::PCWSTR;
use windows_sys::Win32::Foundation::HINSTANCE;
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    self as wm, LoadCursorW, LoadIconW, RegisterClassW, UnregisterClassW, WNDCLASSW,
};

use crate::config::AppAttributes;
use crate::error::{Error, ErrorKind, Result};
use crate::utils;

use super::window;

/// The application context.
///
/// Holds the module handle of the executable and the window class that every
/// [`Window`] and the WGL bootstrap window are created from. The class is
/// unregistered by [`App::terminate`], or on drop.
///
/// [`Window`]: super::Window
pub struct App {
    instance: HINSTANCE,
    class_name: String,
    wide_class_name: Vec<u16>,
    registered: bool,
    // Windows of the class are bound to the registering thread.
    _nosendsync: PhantomData<*const ()>,
}

impl App {
    /// Register the window class described by `attributes`.
    pub fn new(attributes: &AppAttributes) -> Result<Self> {
        attributes.validate()?;
        let wide_class_name = utils::encode_wide(attributes.class_name())?;

        unsafe {
            let instance = GetModuleHandleW(ptr::null());

            let class = WNDCLASSW {
                style: wm::CS_HREDRAW | wm::CS_VREDRAW | wm::CS_OWNDC,
                lpfnWndProc: Some(window::window_proc),
                cbClsExtra: 0,
                cbWndExtra: 0,
                hInstance: instance,
                hIcon: LoadIconW(0, wm::IDI_APPLICATION),
                hCursor: LoadCursorW(0, wm::IDC_ARROW),
                hbrBackground: 0,
                lpszMenuName: ptr::null(),
                lpszClassName: wide_class_name.as_ptr(),
            };

            if RegisterClassW(&class) == 0 {
                return Err(Error::last_os_error(ErrorKind::RegisterClassFailed));
            }

            debug!("registered window class {:?}", attributes.class_name());

            Ok(Self {
                instance,
                class_name: attributes.class_name().to_owned(),
                wide_class_name,
                registered: true,
                _nosendsync: PhantomData,
            })
        }
    }

    /// Unregister the window class.
    ///
    /// Calling it again after it succeeded does nothing.
    pub fn terminate(&mut self) -> Result<()> {
        if !self.registered {
            return Ok(());
        }

        if unsafe { UnregisterClassW(self.class_name_ptr(), self.instance) } == 0 {
            return Err(Error::last_os_error(ErrorKind::UnregisterClassFailed));
        }

        self.registered = false;
        debug!("unregistered window class {:?}", self.class_name);
        Ok(())
    }

    /// The module handle of the executable.
    pub fn instance(&self) -> HINSTANCE {
        self.instance
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn is_terminated(&self) -> bool {
        !self.registered
    }

    pub(crate) fn class_name_ptr(&self) -> PCWSTR {
        self.wide_class_name.as_ptr()
    }

    /// Fail with [`ErrorKind::InvalidArgs`] once the class is gone.
    pub(crate) fn check_registered(&self) -> Result<()> {
        if self.registered {
            Ok(())
        } else {
            Err(ErrorKind::InvalidArgs.into())
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(err) = self.terminate() {
            warn!("leaking window class {:?}: {err}", self.class_name);
        }
    }
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("instance", &self.instance)
            .field("class_name", &self.class_name)
            .field("registered", &self.registered)
            .finish()
    }
}
