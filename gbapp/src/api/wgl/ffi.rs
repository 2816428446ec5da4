//! Signatures of the base WGL entry points exported by `opengl32.dll`.
//!
//! Extension entry points come from [`glutin_wgl_sys::wgl_extra`].

use std::os::raw::{c_char, c_void};

use windows_sys::Win32::Foundation::BOOL;
use windows_sys::Win32::Graphics::Gdi::HDC;
use windows_sys::Win32::Graphics::OpenGL::HGLRC;

pub type CreateContext = unsafe extern "system" fn(hdc: HDC) -> HGLRC;
pub type DeleteContext = unsafe extern "system" fn(hglrc: HGLRC) -> BOOL;
pub type MakeCurrent = unsafe extern "system" fn(hdc: HDC, hglrc: HGLRC) -> BOOL;
pub type GetCurrentDc = unsafe extern "system" fn() -> HDC;
pub type GetProcAddress = unsafe extern "system" fn(name: *const c_char) -> *const c_void;
