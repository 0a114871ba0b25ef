//! Shared availability
//!
//! One retained availability topic for every entity of a device. The topic is
//! composed once, when the feature is enabled, and owned by [`Availability`].

use heapless::String;

use crate::{
    config::{AvailabilityConfig, PAYLOAD_OFFLINE, PAYLOAD_ONLINE},
    error::DeviceError,
    topic,
    transport::{LastWill, MqttLink},
};

/// Observable availability state of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AvailabilityState {
    /// Shared availability was never enabled
    Disabled,
    Online,
    Offline,
}

/// Result of an availability publish attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PublishOutcome {
    /// The client accepted the message
    Published,
    /// Nothing to do: feature disabled or link down
    Skipped,
    /// The client rejected the message. It is not retried.
    Failed,
}

/// Payload announcing the given availability
pub const fn payload(online: bool) -> &'static str {
    if online {
        PAYLOAD_ONLINE
    } else {
        PAYLOAD_OFFLINE
    }
}

/// Enabled shared availability of a device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability<const N: usize> {
    topic: String<N>,
}

impl<const N: usize> Availability<N> {
    /// Compose the availability topic for `unique_id`
    pub fn new(config: &AvailabilityConfig<'_>, unique_id: &str) -> Result<Self, DeviceError> {
        let topic = topic::availability_topic(config.data_prefix, unique_id)?;
        Ok(Self { topic })
    }

    pub fn topic(&self) -> &str {
        self.topic.as_str()
    }

    /// Last will that flips the device offline when the session drops
    pub fn last_will(&self) -> LastWill<'_> {
        LastWill {
            topic: self.topic.as_str(),
            payload: PAYLOAD_OFFLINE.as_bytes(),
            retain: true,
        }
    }

    /// Publish `online` as a retained message if the link is up
    pub fn publish<L: MqttLink + ?Sized>(&self, online: bool, link: &mut L) -> PublishOutcome {
        if !link.is_connected() {
            trace!("ha_device: link down, availability not published");
            return PublishOutcome::Skipped;
        }

        let message = payload(online);
        if link.publish(self.topic.as_str(), message.as_bytes(), true) {
            debug!("ha_device: published {} on {}", message, self.topic.as_str());
            PublishOutcome::Published
        } else {
            warn!("ha_device: failed to publish availability on {}", self.topic.as_str());
            PublishOutcome::Failed
        }
    }
}
