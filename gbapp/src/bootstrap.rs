//! The dummy context bootstrap used to reach WGL extension functions.
//!
//! `wglGetProcAddress` only returns extension entry points while a context is
//! current, a context can only be created on a surface with a pixel format,
//! and a surface's pixel format can't be changed once set. So a throwaway
//! window and legacy context are made for the lookup alone and torn down
//! before [`run`] returns, on success and on every failure path.

use std::os::raw::c_int;

use log::debug;

use crate::error::Result;
use crate::extensions::{Capabilities, ExtensionStrings};

/// The host operations driven by [`run`].
///
/// Resources are handed back as owned values whose `Drop` releases them, so
/// the sequence never has to pair acquire and release calls by hand.
pub trait BootstrapHost {
    /// An invisible window together with its device context. Dropping it
    /// releases the device context and destroys the window.
    type Window;

    /// A legacy rendering context. Dropping it deletes the context.
    type Context;

    /// Proof that a context is current. Dropping it detaches the context.
    type Current;

    /// The resolved extension entry points.
    type Functions;

    /// Create the dummy window, get its device context and drain its creation
    /// messages.
    fn create_window(&self) -> Result<Self::Window>;

    /// Find a double buffered RGBA pixel format for the window's surface and
    /// return its index.
    fn choose_pixel_format(&self, window: &Self::Window) -> Result<c_int>;

    /// Apply the pixel format chosen by [`BootstrapHost::choose_pixel_format`].
    fn set_pixel_format(&self, window: &Self::Window, pixel_format: c_int) -> Result<()>;

    /// Create a context through the legacy path.
    fn create_context(&self, window: &Self::Window) -> Result<Self::Context>;

    /// Make the context current on the window's surface.
    fn make_current(&self, window: &Self::Window, context: &Self::Context)
        -> Result<Self::Current>;

    /// Resolve every extension function. All of them are required.
    fn load_functions(&self, current: &Self::Current) -> Result<Self::Functions>;

    /// Query both extension strings.
    fn extension_strings(
        &self,
        window: &Self::Window,
        functions: &Self::Functions,
    ) -> ExtensionStrings;
}

/// What a successful bootstrap yields.
#[derive(Debug, Clone)]
pub struct Bootstrapped<F> {
    pub functions: F,
    pub capabilities: Capabilities,
}

/// Run the bootstrap sequence.
///
/// Each step runs only if the previous one succeeded, and the first failure
/// is returned as is. Nothing acquired here outlives the call.
pub fn run<H: BootstrapHost>(host: &H) -> Result<Bootstrapped<H::Functions>> {
    let window = host.create_window()?;
    debug!("bootstrap: dummy window created");

    let pixel_format = host.choose_pixel_format(&window)?;
    host.set_pixel_format(&window, pixel_format)?;
    let context = host.create_context(&window)?;
    let current = host.make_current(&window, &context)?;
    debug!("bootstrap: dummy context current");

    let functions = host.load_functions(&current)?;
    let extensions = host.extension_strings(&window, &functions);
    let capabilities = extensions.capabilities();
    debug!("bootstrap: capabilities {capabilities:?}");

    // Release in reverse order of acquisition.
    drop(current);
    drop(context);
    drop(window);

    Ok(Bootstrapped { functions, capabilities })
}
