//! The purpose of this library is to open Win32 windows, pump their messages
//! and bootstrap WGL, so that an OpenGL context with modern attributes can be
//! created on them.
//!
//! Start with an [`App`], which registers the window class every window of the
//! process uses. [`Window`]s are created from it, hidden, and expose their
//! device context as the drawing surface. Call [`Window::poll_events`] once per
//! frame to drain the message queue and check [`Window::should_close`]
//! afterwards.
//!
//! [`Wgl::load`] resolves the WGL extension functions. WGL only hands them out
//! while a context is current, so a throwaway window and context are created
//! for the lookup and destroyed before it returns. The resulting [`Wgl`]
//! reports the driver [`Capabilities`] and creates real contexts.
//!
//! The platform independent parts, such as extension matching, the bootstrap
//! sequence and message routing, build on every target. The Win32 backend is
//! only available on Windows.
//!
//! [`App`]: crate::api::wgl::App
//! [`Window`]: crate::api::wgl::Window
//! [`Window::poll_events`]: crate::api::wgl::Window::poll_events
//! [`Window::should_close`]: crate::api::wgl::Window::should_close
//! [`Wgl::load`]: crate::api::wgl::Wgl::load
//! [`Wgl`]: crate::api::wgl::Wgl
//! [`Capabilities`]: crate::extensions::Capabilities

#![deny(rust_2018_idioms)]
#![deny(missing_debug_implementations)]

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod event;
pub mod extensions;
pub mod lifecycle;

mod utils;

#[cfg(wgl_backend)]
pub use api::wgl::{App, Context, Wgl, Window};
