//! Win32 windows and the WGL extension loader.

mod app;
mod context;
mod dummy;
pub mod ffi;
mod loader;
mod pixel_format;
mod window;

pub use app::App;
pub use context::Context;
pub use loader::{BaseFunctions, ExtensionFunctions, Wgl};
pub use window::Window;
