//! The platform backends.

#[cfg(wgl_backend)]
pub mod wgl;
