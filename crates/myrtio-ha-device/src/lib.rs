//! Home Assistant device identity for embedded devices
//!
//! This crate holds the part of a Home Assistant MQTT integration that every
//! entity depends on: the device itself. It is structured in three layers:
//!
//! - **Identity** (`unique_id`, `device`): the unique ID (borrowed or derived
//!   from raw bytes) and the registry metadata
//! - **Availability** (`availability`, `topic`, `transport`): one retained
//!   availability topic shared by all entities, plus the last will that flips
//!   it offline when the connection drops
//! - **Entity contract** (`entity`, `serializer`): what sensors, lights and
//!   other entities read from the device to render their discovery payloads
//!
//! Nothing here allocates: owned strings live in fixed-capacity `heapless`
//! buffers sized by const generics.
//!
//! # Example
//!
//! ```ignore
//! use myrtio_ha_device::{HaDevice, MqttLink};
//!
//! let mut device: HaDevice<'static> = HaDevice::from_bytes(&mac_address);
//! device.set_name("Desk Lamp");
//! device.set_manufacturer("MyrtIO");
//! device.enable_shared_availability()?;
//! device.enable_last_will(&mut link)?;
//!
//! // after every (re)connect
//! device.on_transport_connected(&mut link);
//!
//! // later
//! device.set_availability(false, &mut link);
//! ```

#![cfg_attr(not(test), no_std)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod availability;
pub mod config;
pub mod device;
pub mod entity;
pub mod error;
pub mod serializer;
pub mod sync;
pub mod topic;
pub mod transport;
pub mod unique_id;

pub use availability::{AvailabilityState, PublishOutcome};
pub use config::AvailabilityConfig;
pub use device::{DeviceBuilder, HaDevice};
pub use entity::DeviceContext;
pub use error::DeviceError;
pub use serializer::{DeviceMetadata, DeviceSerializer, HaDeviceInfo};
pub use sync::SharedDevice;
pub use transport::{LastWill, MqttLink};
pub use unique_id::UniqueId;
