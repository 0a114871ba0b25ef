//! Fake MQTT link shared by the integration tests

#![allow(dead_code)]

use myrtio_ha_device::{LastWill, MqttLink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Published {
    pub(crate) topic: String,
    pub(crate) payload: String,
    pub(crate) retain: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Will {
    pub(crate) topic: String,
    pub(crate) payload: String,
    pub(crate) retain: bool,
}

/// Records every call the device makes
#[derive(Debug, Default)]
pub(crate) struct FakeLink {
    pub(crate) connected: bool,
    pub(crate) reject_publish: bool,
    pub(crate) published: Vec<Published>,
    pub(crate) will: Option<Will>,
}

impl FakeLink {
    pub(crate) fn connected() -> Self {
        Self {
            connected: true,
            ..Self::default()
        }
    }

    pub(crate) fn disconnected() -> Self {
        Self::default()
    }

    pub(crate) fn payloads(&self) -> Vec<&str> {
        self.published.iter().map(|p| p.payload.as_str()).collect()
    }
}

impl MqttLink for FakeLink {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, topic: &str, payload: &[u8], retain: bool) -> bool {
        if self.reject_publish {
            return false;
        }
        self.published.push(Published {
            topic: topic.to_owned(),
            payload: String::from_utf8(payload.to_vec()).unwrap(),
            retain,
        });
        true
    }

    fn set_last_will(&mut self, will: LastWill<'_>) {
        self.will = Some(Will {
            topic: will.topic.to_owned(),
            payload: String::from_utf8(will.payload.to_vec()).unwrap(),
            retain: will.retain,
        });
    }
}
