use std::iter;

use crate::error::{ErrorKind, Result};

/// Encode `value` as a NUL terminated UTF-16 string for the wide Win32 APIs.
#[cfg_attr(not(wgl_backend), allow(dead_code))]
pub(crate) fn encode_wide(value: &str) -> Result<Vec<u16>> {
    if value.contains('\0') {
        return Err(ErrorKind::InvalidArgs.into());
    }

    Ok(value.encode_utf16().chain(iter::once(0)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminates_with_nul() {
        assert_eq!(encode_wide("GB").unwrap(), vec![b'G' as u16, b'B' as u16, 0]);
        assert_eq!(encode_wide("").unwrap(), vec![0]);
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = encode_wide("GB\0APP").unwrap_err();
        assert_eq!(err.error_kind(), ErrorKind::InvalidArgs);
    }
}
