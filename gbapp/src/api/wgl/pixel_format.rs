//! Choosing and applying pixel formats through `PIXELFORMATDESCRIPTOR`.

use std::mem::{self, MaybeUninit};
use std::os::raw::c_int;

use log::debug;
use windows_sys::Win32::Graphics::Gdi::HDC;
use windows_sys::Win32::Graphics::OpenGL::{self as gl, PIXELFORMATDESCRIPTOR};

use crate::config::PixelFormatAttributes;
use crate::error::{Error, ErrorKind, Result};

fn descriptor(attributes: &PixelFormatAttributes) -> PIXELFORMATDESCRIPTOR {
    let mut dw_flags = gl::PFD_DRAW_TO_WINDOW | gl::PFD_SUPPORT_OPENGL;
    if attributes.double_buffer() {
        dw_flags |= gl::PFD_DOUBLEBUFFER;
    }

    PIXELFORMATDESCRIPTOR {
        nSize: mem::size_of::<PIXELFORMATDESCRIPTOR>() as _,
        // Should be one according to the docs.
        nVersion: 1,
        dwFlags: dw_flags,
        iPixelType: gl::PFD_TYPE_RGBA,
        cColorBits: attributes.color_bits(),
        cRedBits: 0,
        cRedShift: 0,
        cGreenBits: 0,
        cGreenShift: 0,
        cBlueBits: 0,
        cBlueShift: 0,
        cAlphaBits: attributes.alpha_bits(),
        cAlphaShift: 0,
        cAccumBits: 0,
        cAccumRedBits: 0,
        cAccumGreenBits: 0,
        cAccumBlueBits: 0,
        cAccumAlphaBits: 0,
        cDepthBits: attributes.depth_bits(),
        cStencilBits: attributes.stencil_bits(),
        cAuxBuffers: 0,
        iLayerType: gl::PFD_MAIN_PLANE as _,
        bReserved: 0,
        dwLayerMask: 0,
        dwVisibleMask: 0,
        dwDamageMask: 0,
    }
}

/// Find the pixel format of `hdc` closest to `attributes`, returning its
/// index.
pub(crate) fn choose(hdc: HDC, attributes: &PixelFormatAttributes) -> Result<c_int> {
    let descriptor = descriptor(attributes);

    let index = unsafe { gl::ChoosePixelFormat(hdc, &descriptor) };
    if index == 0 {
        return Err(Error::last_os_error(ErrorKind::ChoosePixelFormatFailed));
    }

    Ok(index)
}

/// Set the pixel format `index` on `hdc`.
///
/// A surface's pixel format can be set only once.
pub(crate) fn set(hdc: HDC, index: c_int) -> Result<()> {
    unsafe {
        let mut descriptor = MaybeUninit::<PIXELFORMATDESCRIPTOR>::uninit();
        if gl::DescribePixelFormat(
            hdc,
            index as _,
            mem::size_of::<PIXELFORMATDESCRIPTOR>() as _,
            descriptor.as_mut_ptr(),
        ) == 0
        {
            return Err(Error::last_os_error(ErrorKind::SetPixelFormatFailed));
        }

        if gl::SetPixelFormat(hdc, index, descriptor.as_ptr()) == 0 {
            return Err(Error::last_os_error(ErrorKind::SetPixelFormatFailed));
        }
    }

    debug!("pixel format {index} set on {hdc:#x}");
    Ok(())
}

/// Choose the closest pixel format to `attributes` and set it on `hdc`,
/// returning its index.
pub(crate) fn apply(hdc: HDC, attributes: &PixelFormatAttributes) -> Result<c_int> {
    let index = choose(hdc, attributes)?;
    set(hdc, index)?;
    Ok(index)
}
