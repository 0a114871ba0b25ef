//! Compile-time defaults and availability configuration

/// Default prefix of device data topics
pub const DEFAULT_DATA_PREFIX: &str = "aha";

/// Last segment of the shared availability topic
pub const AVAILABILITY_TOPIC_SUFFIX: &str = "avty_t";

/// Payload published while the device is available
pub const PAYLOAD_ONLINE: &str = "online";

/// Payload published while the device is unavailable (and used as last will)
pub const PAYLOAD_OFFLINE: &str = "offline";

/// Default capacity of an owned unique ID (16 raw bytes, hex encoded)
pub const DEFAULT_UNIQUE_ID_CAPACITY: usize = 32;

/// Default capacity of the shared availability topic
pub const DEFAULT_TOPIC_CAPACITY: usize = 64;

/// Shared availability settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityConfig<'a> {
    /// First topic segment, e.g. `aha` in `aha/<id>/avty_t`
    pub data_prefix: &'a str,
}

impl<'a> AvailabilityConfig<'a> {
    pub const fn new() -> Self {
        Self {
            data_prefix: DEFAULT_DATA_PREFIX,
        }
    }

    /// Set data prefix
    #[must_use]
    pub const fn with_data_prefix(mut self, data_prefix: &'a str) -> Self {
        self.data_prefix = data_prefix;
        self
    }
}

impl Default for AvailabilityConfig<'_> {
    fn default() -> Self {
        Self::new()
    }
}
