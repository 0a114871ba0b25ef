//! Error types for the device identity layer

use core::fmt;

/// Error type for device identity and availability operations
///
/// Every failing operation leaves the device exactly as it was before the
/// call, so the caller may retry configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceError {
    /// The unique ID was already assigned and cannot change
    UniqueIdAlreadySet,
    /// Zero-length input for the unique ID
    EmptyUniqueId,
    /// The operation needs a unique ID and none is set
    MissingUniqueId,
    /// The operation needs shared availability to be enabled first
    SharedAvailabilityDisabled,
    /// A fixed-capacity buffer is too small for the value
    CapacityExceeded,
    /// JSON serialization error
    Serialization,
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::UniqueIdAlreadySet => write!(f, "Unique ID is already set"),
            DeviceError::EmptyUniqueId => write!(f, "Unique ID is empty"),
            DeviceError::MissingUniqueId => write!(f, "Unique ID is not set"),
            DeviceError::SharedAvailabilityDisabled => {
                write!(f, "Shared availability is not enabled")
            }
            DeviceError::CapacityExceeded => write!(f, "Buffer capacity exceeded"),
            DeviceError::Serialization => write!(f, "JSON serialization error"),
        }
    }
}
