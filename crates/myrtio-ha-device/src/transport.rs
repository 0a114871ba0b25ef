//! MQTT link abstraction
//!
//! The device never talks to the network itself. Whatever MQTT client the
//! firmware runs implements [`MqttLink`] and is handed to the availability
//! operations, which makes the dependency explicit and lets tests use a fake.
//!
//! # Example
//!
//! ```ignore
//! struct ClientLink<'c> { client: &'c mut MyClient }
//!
//! impl MqttLink for ClientLink<'_> {
//!     fn is_connected(&self) -> bool { self.client.is_connected() }
//!     fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool {
//!         self.client.try_publish(topic, payload, retain).is_ok()
//!     }
//!     fn set_last_will(&mut self, will: LastWill<'_>) {
//!         self.client.options_mut().set_will(will.topic, will.payload, will.retain);
//!     }
//! }
//! ```

/// Last will registered with the broker on connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LastWill<'a> {
    pub topic: &'a str,
    pub payload: &'a [u8],
    pub retain: bool,
}

/// Messaging transport used to publish availability
pub trait MqttLink {
    /// Returns true while a broker session is established
    fn is_connected(&self) -> bool;

    /// Publish a message, best effort. Returns false if the client rejected it.
    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool;

    /// Configure the last will. Must be called before the connection is made.
    fn set_last_will(&mut self, will: LastWill<'_>);
}

impl<T: MqttLink + ?Sized> MqttLink for &mut T {
    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool {
        (**self).publish(topic, payload, retain)
    }

    fn set_last_will(&mut self, will: LastWill<'_>) {
        (**self).set_last_will(will);
    }
}
