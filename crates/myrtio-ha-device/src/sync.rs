//! Shared access to a device
//!
//! The device itself is not synchronized. When the MQTT callbacks and the main
//! loop run in different contexts (an interrupt-driven client, another
//! executor), wrap the device in [`SharedDevice`] so every access happens
//! inside a critical section.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{Mutex, raw::CriticalSectionRawMutex};

use crate::{
    availability::PublishOutcome,
    config::{DEFAULT_TOPIC_CAPACITY, DEFAULT_UNIQUE_ID_CAPACITY},
    device::HaDevice,
    transport::MqttLink,
};

/// Critical-section guarded device
///
/// ```ignore
/// static DEVICE: SharedDevice<'static> = SharedDevice::new(HaDevice::with_unique_id("lamp"));
///
/// DEVICE.lock(|device| device.enable_shared_availability())?;
/// ```
pub struct SharedDevice<
    'a,
    const ID_CAP: usize = DEFAULT_UNIQUE_ID_CAPACITY,
    const TOPIC_CAP: usize = DEFAULT_TOPIC_CAPACITY,
> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<HaDevice<'a, ID_CAP, TOPIC_CAP>>>,
}

impl<'a, const ID_CAP: usize, const TOPIC_CAP: usize> SharedDevice<'a, ID_CAP, TOPIC_CAP> {
    pub const fn new(device: HaDevice<'a, ID_CAP, TOPIC_CAP>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(device)),
        }
    }

    /// Run `f` with exclusive access to the device.
    ///
    /// # Panics
    /// Panics if called again from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut HaDevice<'a, ID_CAP, TOPIC_CAP>) -> R) -> R {
        self.inner.lock(|cell| f(&mut *cell.borrow_mut()))
    }

    pub fn is_available(&self) -> bool {
        self.lock(|device| device.is_available())
    }

    /// See [`HaDevice::set_availability`]
    pub fn set_availability<L: MqttLink + ?Sized>(
        &self,
        online: bool,
        link: &mut L,
    ) -> PublishOutcome {
        self.lock(|device| device.set_availability(online, link))
    }

    /// See [`HaDevice::on_transport_connected`]
    pub fn on_transport_connected<L: MqttLink + ?Sized>(&self, link: &mut L) -> PublishOutcome {
        self.lock(|device| device.on_transport_connected(link))
    }

    pub fn into_inner(self) -> HaDevice<'a, ID_CAP, TOPIC_CAP> {
        self.inner.into_inner().into_inner()
    }
}
