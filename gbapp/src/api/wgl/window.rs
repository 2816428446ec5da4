//! Win32 windows and their message handling.

use std::cell::{Cell, RefCell};
use std::num::NonZeroIsize;
use std::rc::Rc;
use std::{fmt, mem, ptr};

use log::{debug, trace, warn};
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, RawWindowHandle,
    Win32WindowHandle, WindowHandle,
};
use windows_sys::Win32::Foundation::{BOOL, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Dwm::{DwmFlush, DwmIsCompositionEnabled};
use windows_sys::Win32::Graphics::Gdi::{self as gdi, HDC, PAINTSTRUCT};
use windows_sys::Win32::Graphics::OpenGL as gl;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    self as wm, AdjustWindowRect, CreateWindowExW, DefWindowProcW, DestroyWindow,
    DispatchMessageW, PeekMessageW, ShowWindow, TranslateMessage, MSG,
};

use crate::config::{CompositorSync, WindowAttributes};
use crate::error::{Error, ErrorKind, Result};
use crate::event::{CloseFlag, Disposition, HostMessage, WindowRegistry};
use crate::lifecycle::{Lifecycle, WindowState};
use crate::utils;

use super::app::App;

thread_local! {
    /// Windows created on this thread, by handle.
    static WINDOWS: RefCell<WindowRegistry<HWND>> = RefCell::new(WindowRegistry::new());
}

/// A top level window.
///
/// The window is created hidden; call [`Window::show`] to map it. Its device
/// context is acquired once at creation and serves as the drawing surface for
/// its whole life.
pub struct Window<'a> {
    app: &'a App,
    hwnd: HWND,
    hdc: HDC,
    close: Rc<CloseFlag>,
    lifecycle: Cell<Lifecycle>,
    compositor_sync: CompositorSync,
}

impl<'a> Window<'a> {
    /// Create a window whose client area has the requested size.
    pub fn new(app: &'a App, attributes: &WindowAttributes) -> Result<Self> {
        app.check_registered()?;
        attributes.validate()?;
        let title = utils::encode_wide(attributes.title())?;

        let style = wm::WS_OVERLAPPEDWINDOW | wm::WS_CLIPCHILDREN | wm::WS_CLIPSIBLINGS;
        let ex_style = wm::WS_EX_APPWINDOW | wm::WS_EX_WINDOWEDGE;

        // Grow the rect so that the client area, not the frame, gets the size.
        let mut rect = RECT {
            left: 0,
            top: 0,
            right: attributes.width() as i32,
            bottom: attributes.height() as i32,
        };
        if unsafe { AdjustWindowRect(&mut rect, style, 0) } == 0 {
            return Err(Error::last_os_error(ErrorKind::AdjustWindowRectFailed));
        }

        let hwnd = unsafe {
            CreateWindowExW(
                ex_style,
                app.class_name_ptr(),
                title.as_ptr(),
                style,
                wm::CW_USEDEFAULT,
                wm::CW_USEDEFAULT,
                rect.right - rect.left,
                rect.bottom - rect.top,
                0,
                0,
                app.instance(),
                ptr::null(),
            )
        };
        if hwnd == 0 {
            return Err(Error::last_os_error(ErrorKind::CreateWindowFailed));
        }

        let hdc = unsafe { gdi::GetDC(hwnd) };
        if hdc == 0 {
            let err = Error::last_os_error(ErrorKind::GetDcFailed);
            unsafe { DestroyWindow(hwnd) };
            return Err(err);
        }

        let close = WINDOWS.with(|windows| windows.borrow_mut().register(hwnd));
        let window = Self {
            app,
            hwnd,
            hdc,
            close,
            lifecycle: Cell::new(Lifecycle::new()),
            compositor_sync: attributes.compositor_sync(),
        };

        // Process creation time messages so they don't show up in the first poll.
        drain_messages(hwnd);
        debug!(
            "created window {hwnd:#x} with a {}x{} client area",
            attributes.width(),
            attributes.height()
        );

        Ok(window)
    }

    /// Make the window visible.
    pub fn show(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.get();
        lifecycle.show()?;

        // The return value is the previous visibility, not an error.
        unsafe { ShowWindow(self.hwnd, wm::SW_SHOW) };
        self.lifecycle.set(lifecycle);
        Ok(())
    }

    /// Present the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.check_alive()?;

        if unsafe { gl::SwapBuffers(self.hdc) } == 0 {
            return Err(Error::last_os_error(ErrorKind::SwapBuffersFailed));
        }

        if self.compositor_sync == CompositorSync::DwmFlush && composition_enabled() {
            let result = unsafe { DwmFlush() };
            if result < 0 {
                trace!("DwmFlush failed with {result:#x}");
            }
        }

        Ok(())
    }

    /// Dispatch every message currently queued for the window.
    ///
    /// Never blocks. A close request delivered here sets
    /// [`Window::should_close`].
    pub fn poll_events(&self) -> Result<()> {
        self.check_alive()?;

        let dispatched = drain_messages(self.hwnd);
        if dispatched != 0 {
            trace!("dispatched {dispatched} messages for window {:#x}", self.hwnd);
        }

        Ok(())
    }

    /// Whether the user asked to close the window.
    ///
    /// Once `true` it stays `true`; the window is not destroyed until
    /// [`Window::destroy`] is called or it's dropped.
    pub fn should_close(&self) -> bool {
        self.close.is_requested()
    }

    pub fn state(&self) -> WindowState {
        self.lifecycle.get().state(self.close.is_requested())
    }

    /// Release the device context and destroy the window.
    ///
    /// Destroying an already destroyed window does nothing.
    pub fn destroy(&mut self) -> Result<()> {
        let mut lifecycle = self.lifecycle.get();
        if lifecycle.destroy() {
            self.lifecycle.set(lifecycle);
            self.release();
        }

        Ok(())
    }

    /// The device context buffers are presented to.
    pub fn surface(&self) -> HDC {
        self.hdc
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    pub fn app(&self) -> &'a App {
        self.app
    }

    pub(crate) fn check_alive(&self) -> Result<()> {
        self.lifecycle.get().check_alive()
    }

    fn release(&self) {
        unsafe {
            gdi::ReleaseDC(self.hwnd, self.hdc);
            if DestroyWindow(self.hwnd) == 0 {
                warn!(
                    "failed to destroy window {:#x}: {}",
                    self.hwnd,
                    std::io::Error::last_os_error()
                );
            }
        }

        // `DestroyWindow` dispatches its own messages, so the registry can only
        // be borrowed mutably once it returned.
        let _ = WINDOWS.try_with(|windows| windows.borrow_mut().unregister(self.hwnd));
        debug!("destroyed window {:#x}", self.hwnd);
    }
}

impl Drop for Window<'_> {
    fn drop(&mut self) {
        let _ = self.destroy();
    }
}

impl fmt::Debug for Window<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("hwnd", &self.hwnd)
            .field("hdc", &self.hdc)
            .field("state", &self.state())
            .finish()
    }
}

impl HasWindowHandle for Window<'_> {
    fn window_handle(&self) -> std::result::Result<WindowHandle<'_>, HandleError> {
        if self.lifecycle.get().is_destroyed() {
            return Err(HandleError::Unavailable);
        }

        let hwnd = NonZeroIsize::new(self.hwnd).ok_or(HandleError::Unavailable)?;
        let mut handle = Win32WindowHandle::new(hwnd);
        handle.hinstance = NonZeroIsize::new(self.app.instance());

        // SAFETY: the handle stays valid while `self` is borrowed.
        Ok(unsafe { WindowHandle::borrow_raw(RawWindowHandle::Win32(handle)) })
    }
}

impl HasDisplayHandle for Window<'_> {
    fn display_handle(&self) -> std::result::Result<DisplayHandle<'_>, HandleError> {
        Ok(DisplayHandle::windows())
    }
}

/// Translate and dispatch every message queued for `hwnd`, returning how many
/// there were.
pub(crate) fn drain_messages(hwnd: HWND) -> usize {
    let mut dispatched = 0;

    unsafe {
        let mut msg: MSG = mem::zeroed();
        while PeekMessageW(&mut msg, hwnd, 0, 0, wm::PM_REMOVE) != 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
            dispatched += 1;
        }
    }

    dispatched
}

fn composition_enabled() -> bool {
    let mut enabled: BOOL = 0;
    let result = unsafe { DwmIsCompositionEnabled(&mut enabled) };
    result >= 0 && enabled != 0
}

/// The window procedure of the application's window class.
pub(crate) unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let message = match msg {
        wm::WM_CLOSE => HostMessage::CloseRequested,
        wm::WM_PAINT => HostMessage::Paint,
        other => HostMessage::Other(other),
    };

    // The registry may already be borrowed when the OS reenters us from inside
    // one of its calls; such messages take the default path.
    let disposition = WINDOWS
        .try_with(|windows| match windows.try_borrow() {
            Ok(windows) => windows.dispatch(hwnd, message),
            Err(_) => Disposition::Default,
        })
        .unwrap_or(Disposition::Default);

    match disposition {
        Disposition::Consumed => 0,
        Disposition::AcknowledgePaint => {
            let mut paint: PAINTSTRUCT = mem::zeroed();
            gdi::BeginPaint(hwnd, &mut paint);
            gdi::EndPaint(hwnd, &paint);
            0
        },
        Disposition::Default => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
