//! WGL extension string matching and the capabilities derived from it.

use bitflags::bitflags;

/// Multisampled pixel formats.
pub const MULTISAMPLE_ARB: &str = "WGL_ARB_multisample";
/// `wglCreateContextAttribsARB`.
pub const CREATE_CONTEXT_ARB: &str = "WGL_ARB_create_context";
/// Core/compatibility profile selection for `wglCreateContextAttribsARB`.
pub const CREATE_CONTEXT_PROFILE_ARB: &str = "WGL_ARB_create_context_profile";
/// `wglSwapIntervalEXT`.
pub const SWAP_CONTROL_EXT: &str = "WGL_EXT_swap_control";
/// `wglGetPixelFormatAttribivARB` and friends.
pub const PIXEL_FORMAT_ARB: &str = "WGL_ARB_pixel_format";

bitflags! {
    /// Driver capabilities discovered while bootstrapping WGL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u8 {
        /// `WGL_ARB_multisample` is present.
        const MULTISAMPLE            = 0b0000_0001;
        /// `WGL_ARB_create_context` is present.
        const CREATE_CONTEXT         = 0b0000_0010;
        /// `WGL_ARB_create_context_profile` is present.
        const CREATE_CONTEXT_PROFILE = 0b0000_0100;
        /// `WGL_EXT_swap_control` is present.
        const SWAP_CONTROL           = 0b0000_1000;
        /// `WGL_ARB_pixel_format` is present.
        const PIXEL_FORMAT           = 0b0001_0000;
    }
}

const KNOWN_EXTENSIONS: [(&str, Capabilities); 5] = [
    (MULTISAMPLE_ARB, Capabilities::MULTISAMPLE),
    (CREATE_CONTEXT_ARB, Capabilities::CREATE_CONTEXT),
    (CREATE_CONTEXT_PROFILE_ARB, Capabilities::CREATE_CONTEXT_PROFILE),
    (SWAP_CONTROL_EXT, Capabilities::SWAP_CONTROL),
    (PIXEL_FORMAT_ARB, Capabilities::PIXEL_FORMAT),
];

impl Capabilities {
    /// The extension name behind a single capability flag.
    pub fn extension_name(self) -> Option<&'static str> {
        KNOWN_EXTENSIONS.iter().find(|(_, flag)| *flag == self).map(|(name, _)| *name)
    }
}

/// Check whether `name` appears in a space separated extension list as a whole
/// token.
///
/// `WGL_ARB_multisample` matches `"foo WGL_ARB_multisample bar"` but not
/// `"WGL_ARB_multisample_other"`.
pub fn has_extension(extensions: &str, name: &str) -> bool {
    if name.is_empty() || name.contains(' ') {
        return false;
    }

    extensions.split(' ').any(|token| token == name)
}

/// Extension strings reported by `wglGetExtensionsStringEXT` and
/// `wglGetExtensionsStringARB`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionStrings {
    /// Output of `wglGetExtensionsStringEXT`.
    pub ext: String,
    /// Output of `wglGetExtensionsStringARB`.
    pub arb: String,
}

impl ExtensionStrings {
    pub fn new(ext: impl Into<String>, arb: impl Into<String>) -> Self {
        Self { ext: ext.into(), arb: arb.into() }
    }

    /// Whether either string lists `name`.
    pub fn contains(&self, name: &str) -> bool {
        has_extension(&self.ext, name) || has_extension(&self.arb, name)
    }

    /// The capability flags for the known extensions.
    pub fn capabilities(&self) -> Capabilities {
        KNOWN_EXTENSIONS
            .iter()
            .filter(|(name, _)| self.contains(name))
            .fold(Capabilities::empty(), |caps, (_, flag)| caps | *flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_token_match() {
        assert!(has_extension("foo WGL_ARB_multisample bar", MULTISAMPLE_ARB));
        assert!(has_extension("WGL_ARB_multisample bar", MULTISAMPLE_ARB));
        assert!(has_extension("foo WGL_ARB_multisample", MULTISAMPLE_ARB));
        assert!(has_extension("WGL_ARB_multisample", MULTISAMPLE_ARB));
    }

    #[test]
    fn rejects_longer_names() {
        assert!(!has_extension("WGL_ARB_multisample_other_ext", MULTISAMPLE_ARB));
        assert!(!has_extension("XWGL_ARB_multisample", MULTISAMPLE_ARB));
        assert!(!has_extension(
            "WGL_ARB_create_context_profile WGL_ARB_create_context_robustness",
            CREATE_CONTEXT_ARB
        ));
    }

    #[test]
    fn tolerates_odd_spacing() {
        assert!(has_extension("  WGL_EXT_swap_control  ", SWAP_CONTROL_EXT));
        assert!(has_extension("WGL_ARB_pixel_format ", PIXEL_FORMAT_ARB));
        assert!(!has_extension("", PIXEL_FORMAT_ARB));
    }

    #[test]
    fn empty_or_spaced_names_never_match() {
        assert!(!has_extension("a  b", ""));
        let both = "WGL_ARB_multisample WGL_ARB_pixel_format";
        assert!(!has_extension(both, both));
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert!(!has_extension("wgl_arb_multisample", MULTISAMPLE_ARB));
    }

    #[test]
    fn either_string_counts() {
        let strings = ExtensionStrings::new("WGL_EXT_swap_control", "WGL_ARB_pixel_format");
        assert_eq!(strings.capabilities(), Capabilities::SWAP_CONTROL | Capabilities::PIXEL_FORMAT);

        let strings =
            ExtensionStrings::new("", "WGL_ARB_create_context WGL_ARB_create_context_profile");
        assert_eq!(
            strings.capabilities(),
            Capabilities::CREATE_CONTEXT | Capabilities::CREATE_CONTEXT_PROFILE
        );
    }

    #[test]
    fn no_extensions_no_capabilities() {
        assert!(ExtensionStrings::default().capabilities().is_empty());
    }

    #[test]
    fn extension_names_round_trip_through_flags() {
        assert_eq!(Capabilities::MULTISAMPLE.extension_name(), Some(MULTISAMPLE_ARB));
        assert_eq!(Capabilities::SWAP_CONTROL.extension_name(), Some(SWAP_CONTROL_EXT));
        assert_eq!((Capabilities::MULTISAMPLE | Capabilities::PIXEL_FORMAT).extension_name(), None);
    }
}
