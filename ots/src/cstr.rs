//! C string arguments.

use std::ffi::CString;
use std::os::raw::c_char;

use zeroize::Zeroizing;

use crate::error::{OtsError, OtsResult};

pub(crate) fn cstring(text: &str) -> OtsResult<CString> {
    Ok(CString::new(text)?)
}

/// NUL terminated copy of a secret, wiped when dropped.
pub(crate) struct SecretCString(Zeroizing<Vec<u8>>);

impl SecretCString {
    pub(crate) fn new(text: &str) -> OtsResult<Self> {
        if text.as_bytes().contains(&0) {
            let message = "string contains an interior NUL byte";
            return Err(OtsError::InvalidArgument(message.to_string()));
        }
        let mut bytes = Zeroizing::new(Vec::with_capacity(text.len() + 1));
        bytes.extend_from_slice(text.as_bytes());
        bytes.push(0);
        Ok(SecretCString(bytes))
    }

    pub(crate) fn as_ptr(&self) -> *const c_char {
        self.0.as_ptr() as *const c_char
    }
}
