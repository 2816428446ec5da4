use cfg_aliases::cfg_aliases;

fn main() {
    // Setup alias to reduce `cfg` boilerplate.
    cfg_aliases! {
        // Systems.
        wasm_platform: { target_family = "wasm" },

        // Backends.
        wgl_backend: { all(feature = "wgl", windows, not(wasm_platform)) },
    }

    println!("cargo:rerun-if-changed=build.rs");
}
