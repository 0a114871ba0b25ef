//! Device unique ID
//!
//! The ID is either borrowed from the caller (a `'static` string baked into the
//! firmware, for example) or derived from raw bytes such as a MAC address and
//! stored inline. Both forms are released together with the owner.

use core::fmt;
use core::ops::Deref;

use heapless::String;

use crate::error::DeviceError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Unique ID of a device, tagged with its ownership
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueId<'a, const N: usize> {
    /// Caller-owned ID, kept alive by the caller for `'a`
    Borrowed(&'a str),
    /// ID encoded by the device into its own buffer
    Owned(String<N>),
}

impl<'a, const N: usize> UniqueId<'a, N> {
    /// Wrap a caller-owned ID without copying it
    pub const fn borrowed(id: &'a str) -> Self {
        Self::Borrowed(id)
    }

    /// Derive the ID from raw bytes, two lowercase hex digits per byte
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DeviceError> {
        encode_hex(bytes).map(Self::Owned)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Borrowed(id) => id,
            Self::Owned(id) => id.as_str(),
        }
    }

    /// Returns true if the buffer belongs to this value
    pub const fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }
}

impl<const N: usize> Deref for UniqueId<'_, N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> AsRef<str> for UniqueId<'_, N> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> fmt::Display for UniqueId<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode `bytes` as lowercase hex into a fixed-capacity string
///
/// Fails without touching any buffer when the input is empty or when the
/// encoded form (`2 * bytes.len()` characters) does not fit `N`.
pub fn encode_hex<const N: usize>(bytes: &[u8]) -> Result<String<N>, DeviceError> {
    if bytes.is_empty() {
        return Err(DeviceError::EmptyUniqueId);
    }
    let encoded_len = bytes
        .len()
        .checked_mul(2)
        .ok_or(DeviceError::CapacityExceeded)?;
    if encoded_len > N {
        return Err(DeviceError::CapacityExceeded);
    }

    let mut encoded = String::new();
    for byte in bytes {
        for nibble in [byte >> 4, byte & 0x0f] {
            encoded
                .push(char::from(HEX_DIGITS[usize::from(nibble)]))
                .map_err(|()| DeviceError::CapacityExceeded)?;
        }
    }
    Ok(encoded)
}
