use std::error::Error;
use std::ffi::{CStr, CString};
use std::ops::Deref;

use gl::types::GLfloat;

pub mod gl {
    #![allow(clippy::all)]
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

#[cfg(wgl_backend)]
pub fn main() -> Result<(), Box<dyn Error>> {
    use std::num::NonZeroU32;
    use std::os::raw::c_int;

    use gbapp::config::{
        AppAttributes, CompositorSync, ContextAttributesBuilder, GlProfile,
        PixelFormatAttributes, SwapInterval, Version, WindowAttributesBuilder,
    };
    use gbapp::{App, Wgl, Window};
    use glutin_wgl_sys::wgl_extra;
    use log::{info, warn};
    use raw_window_handle::HasWindowHandle;

    env_logger::init();

    let app = App::new(&AppAttributes::default())?;
    let attributes = WindowAttributesBuilder::new()
        .with_size(800, 600)
        .with_title("A fantastic window!")
        .with_compositor_sync(CompositorSync::DwmFlush)
        .build();
    let mut window = Window::new(&app, &attributes)?;
    info!("Window handle: {:?}", window.window_handle()?);

    let wgl = Wgl::load(&app)?;
    info!("Driver capabilities: {:?}", wgl.capabilities());

    let pixel_format = wgl.set_pixel_format(&window, &PixelFormatAttributes::default())?;
    if wgl.has_pixel_format() {
        let query = [wgl_extra::COLOR_BITS_ARB as c_int, wgl_extra::DEPTH_BITS_ARB as c_int];
        let values = wgl.pixel_format_attribs(&window, pixel_format, &query)?;
        info!("Picked pixel format {pixel_format} with color/depth bits {values:?}");
    }

    // The legacy path can only give whatever the driver defaults to.
    let mut context_attributes = ContextAttributesBuilder::new();
    if wgl.has_create_context() {
        context_attributes = context_attributes.with_version(Version::new(3, 3));
    }
    if wgl.has_create_context_profile() {
        context_attributes = context_attributes.with_profile(GlProfile::Compatibility);
    }
    let context = wgl.create_context(&window, &context_attributes.build())?;
    context.make_current(&window)?;

    if let Err(err) = wgl.set_swap_interval(SwapInterval::Wait(NonZeroU32::MIN)) {
        warn!("Error setting vsync: {err}");
    }

    let renderer = Renderer::new(|symbol| wgl.get_proc_address(symbol));
    window.show()?;

    while !window.should_close() {
        window.poll_events()?;
        renderer.draw_with_clear_color(1.0, 0.5, 0.7, 1.0);
        window.swap_buffers()?;
    }

    drop(renderer);
    wgl.make_not_current()?;
    drop(context);
    window.destroy()?;

    Ok(())
}

#[cfg(not(wgl_backend))]
pub fn main() -> Result<(), Box<dyn Error>> {
    Err("the example needs Windows and the `wgl` feature".into())
}

pub struct Renderer {
    gl: gl::Gl,
}

impl Renderer {
    /// Load the GL functions through `get_proc_address`, which must serve the
    /// context current on this thread.
    pub fn new<F>(mut get_proc_address: F) -> Self
    where
        F: FnMut(&CStr) -> *const std::os::raw::c_void,
    {
        let gl = gl::Gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            get_proc_address(symbol.as_c_str())
        });

        if let Some(renderer) = get_gl_string(&gl, gl::RENDERER) {
            println!("Running on {}", renderer.to_string_lossy());
        }
        if let Some(version) = get_gl_string(&gl, gl::VERSION) {
            println!("OpenGL Version {}", version.to_string_lossy());
        }

        Self { gl }
    }

    pub fn draw_with_clear_color(
        &self,
        red: GLfloat,
        green: GLfloat,
        blue: GLfloat,
        alpha: GLfloat,
    ) {
        unsafe {
            self.gl.ClearColor(red, green, blue, alpha);
            self.gl.Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Deref for Renderer {
    type Target = gl::Gl;

    fn deref(&self) -> &Self::Target {
        &self.gl
    }
}

fn get_gl_string(gl: &gl::Gl, variant: gl::types::GLenum) -> Option<&'static CStr> {
    unsafe {
        let s = gl.GetString(variant);
        (!s.is_null()).then(|| CStr::from_ptr(s.cast()))
    }
}
