//! WGL library loading and extension bootstrapping.

use std::ffi::{CStr, CString};
use std::ops::Deref;
use std::os::raw::c_void;
use std::{fmt, ptr};

use glutin_wgl_sys::wgl_extra::Wgl as WglExtra;
use libloading::os::windows::{Library as WinLibrary, LOAD_LIBRARY_SEARCH_DEFAULT_DIRS};
use libloading::Library;
use log::debug;

use crate::bootstrap::{self, Bootstrapped};
use crate::error::{Error, ErrorKind, Result};
use crate::extensions::Capabilities;

use super::app::App;
use super::dummy::DummyHost;
use super::ffi;

const OPENGL32: &str = "opengl32.dll";

/// The entry points exported by `opengl32.dll` itself.
#[derive(Clone, Copy)]
pub struct BaseFunctions {
    pub create_context: ffi::CreateContext,
    pub delete_context: ffi::DeleteContext,
    pub make_current: ffi::MakeCurrent,
    pub get_current_dc: ffi::GetCurrentDc,
    pub get_proc_address: ffi::GetProcAddress,
}

impl BaseFunctions {
    /// # Safety
    ///
    /// The returned pointers are valid only while `lib` stays loaded.
    unsafe fn load(lib: &Library) -> Result<Self> {
        Ok(Self {
            create_context: symbol(lib, b"wglCreateContext\0")?,
            delete_context: symbol(lib, b"wglDeleteContext\0")?,
            make_current: symbol(lib, b"wglMakeCurrent\0")?,
            get_current_dc: symbol(lib, b"wglGetCurrentDC\0")?,
            get_proc_address: symbol(lib, b"wglGetProcAddress\0")?,
        })
    }
}

/// The extension entry points handed out by the driver.
///
/// Dereferences to the generated [`WglExtra`] table. Every function gbapp
/// relies on is known to be loaded.
pub struct ExtensionFunctions {
    extra: WglExtra,
}

impl ExtensionFunctions {
    /// # Safety
    ///
    /// A context must be current on the calling thread.
    pub(crate) unsafe fn load(get_proc_address: ffi::GetProcAddress) -> Result<Self> {
        let extra = WglExtra::load_with(|name| {
            let name = match CString::new(name) {
                Ok(name) => name,
                Err(_) => return ptr::null(),
            };

            let address = get_proc_address(name.as_ptr());
            if is_invalid_address(address) {
                ptr::null()
            } else {
                address
            }
        });

        let required = [
            ("wglGetExtensionsStringEXT", extra.GetExtensionsStringEXT.is_loaded()),
            ("wglGetExtensionsStringARB", extra.GetExtensionsStringARB.is_loaded()),
            ("wglCreateContextAttribsARB", extra.CreateContextAttribsARB.is_loaded()),
            ("wglSwapIntervalEXT", extra.SwapIntervalEXT.is_loaded()),
            ("wglGetPixelFormatAttribivARB", extra.GetPixelFormatAttribivARB.is_loaded()),
        ];

        if let Some((name, _)) = required.iter().find(|(_, loaded)| !loaded) {
            return Err(Error::with_message(
                ErrorKind::LoadExtensionFailed,
                format!("{name} is not provided by the driver"),
            ));
        }

        Ok(Self { extra })
    }
}

impl Deref for ExtensionFunctions {
    type Target = WglExtra;

    fn deref(&self) -> &Self::Target {
        &self.extra
    }
}

/// The loaded WGL state.
///
/// Every function pointer in here was resolved successfully; there is no
/// partially loaded `Wgl`. Keeps `opengl32.dll` loaded for as long as it
/// lives.
pub struct Wgl {
    pub(crate) base: BaseFunctions,
    pub(crate) extra: ExtensionFunctions,
    pub(crate) capabilities: Capabilities,
    lib: Library,
}

impl Wgl {
    /// Load `opengl32.dll` and bootstrap the extension functions through a
    /// dummy window of `app`'s class.
    pub fn load(app: &App) -> Result<Self> {
        app.check_registered()?;

        let lib = unsafe {
            WinLibrary::load_with_flags(OPENGL32, LOAD_LIBRARY_SEARCH_DEFAULT_DIRS)
                .map(Library::from)
                .map_err(|err| Error::with_message(ErrorKind::LoadLibraryFailed, err.to_string()))?
        };
        let base = unsafe { BaseFunctions::load(&lib)? };
        debug!("loaded {OPENGL32}");

        let host = DummyHost::new(app, &base);
        let Bootstrapped { functions, capabilities } = bootstrap::run(&host)?;

        Ok(Self { base, extra: functions, capabilities, lib })
    }

    /// The driver capabilities found during bootstrap.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn has_multisample(&self) -> bool {
        self.capabilities.contains(Capabilities::MULTISAMPLE)
    }

    pub fn has_create_context(&self) -> bool {
        self.capabilities.contains(Capabilities::CREATE_CONTEXT)
    }

    pub fn has_create_context_profile(&self) -> bool {
        self.capabilities.contains(Capabilities::CREATE_CONTEXT_PROFILE)
    }

    pub fn has_swap_control(&self) -> bool {
        self.capabilities.contains(Capabilities::SWAP_CONTROL)
    }

    pub fn has_pixel_format(&self) -> bool {
        self.capabilities.contains(Capabilities::PIXEL_FORMAT)
    }

    /// The entry points exported by `opengl32.dll`.
    pub fn base(&self) -> &BaseFunctions {
        &self.base
    }

    /// The extension entry points.
    pub fn extensions(&self) -> &ExtensionFunctions {
        &self.extra
    }

    /// Look up an OpenGL function for the current context.
    ///
    /// `wglGetProcAddress` returns null for the GL 1.1 functions, which are
    /// exported by `opengl32.dll` itself, so those are looked up there.
    pub fn get_proc_address(&self, name: &CStr) -> *const c_void {
        unsafe {
            let address = (self.base.get_proc_address)(name.as_ptr());
            if !is_invalid_address(address) {
                return address;
            }

            self.lib
                .get::<*const c_void>(name.to_bytes_with_nul())
                .map(|symbol| *symbol)
                .unwrap_or(ptr::null())
        }
    }
}

impl fmt::Debug for BaseFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseFunctions")
            .field("get_proc_address", &(self.get_proc_address as *const c_void))
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for ExtensionFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionFunctions").finish_non_exhaustive()
    }
}

impl fmt::Debug for Wgl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wgl").field("capabilities", &self.capabilities).finish()
    }
}

/// Some drivers return small integers instead of null for missing functions.
fn is_invalid_address(address: *const c_void) -> bool {
    matches!(address as isize, -1 | 0 | 1 | 2 | 3)
}

fn display_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name.strip_suffix(b"\0").unwrap_or(name)).into_owned()
}

/// # Safety
///
/// `T` must be the function pointer type of the symbol.
unsafe fn symbol<T: Copy>(lib: &Library, name: &[u8]) -> Result<T> {
    lib.get::<T>(name).map(|symbol| *symbol).map_err(|err| {
        Error::with_message(
            ErrorKind::ResolveSymbolFailed,
            format!("{}: {err}", display_name(name)),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_addresses_are_missing() {
        for address in [-1isize, 0, 1, 2, 3] {
            assert!(is_invalid_address(address as *const c_void));
        }

        assert!(!is_invalid_address(4 as *const c_void));
        assert!(!is_invalid_address(0x7ff0_1000 as *const c_void));
    }

    #[test]
    fn symbol_names_lose_the_terminator() {
        assert_eq!(display_name(b"wglCreateContext\0"), "wglCreateContext");
        assert_eq!(display_name(b"wglCreateContext"), "wglCreateContext");
    }
}
