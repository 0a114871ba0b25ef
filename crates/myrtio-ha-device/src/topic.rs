//! Topic and identifier composition
//!
//! All values are derived only from their inputs: the same unique ID always
//! yields the same topic.

use core::fmt::Write;
use heapless::String;

use crate::{config::AVAILABILITY_TOPIC_SUFFIX, error::DeviceError};

/// Generate the shared availability topic of a device
///
/// Format: `{data_prefix}/{unique_id}/avty_t`
pub fn availability_topic<const N: usize>(
    data_prefix: &str,
    unique_id: &str,
) -> Result<String<N>, DeviceError> {
    let mut topic = String::new();
    write!(
        topic,
        "{}/{}/{}",
        data_prefix, unique_id, AVAILABILITY_TOPIC_SUFFIX
    )
    .map_err(|_| DeviceError::CapacityExceeded)?;
    Ok(topic)
}

/// Generate the unique ID an entity announces in discovery
///
/// Format: `{device_id}_{entity_id}` when extended unique IDs are enabled,
/// `{entity_id}` otherwise.
pub fn entity_unique_id<const N: usize>(
    device_id: &str,
    extended: bool,
    entity_id: &str,
) -> Result<String<N>, DeviceError> {
    let mut id = String::new();
    let written = if extended {
        write!(id, "{}_{}", device_id, entity_id)
    } else {
        id.push_str(entity_id).map_err(|()| core::fmt::Error)
    };
    written.map_err(|_| DeviceError::CapacityExceeded)?;
    Ok(id)
}
