//! Contract between a device and the entities attached to it
//!
//! Entity implementations (sensors, switches, lights, ...) only need this view
//! of the device, so they stay independent of its buffer capacities.

use heapless::String;

use crate::{device::HaDevice, error::DeviceError, serializer::DeviceSerializer, topic};

/// Read-only view of a device used when rendering entity discovery payloads
pub trait DeviceContext {
    /// Device unique ID. Entities cannot be announced without it.
    fn unique_id(&self) -> Option<&str>;

    fn serializer(&self) -> &DeviceSerializer<'_>;

    fn is_shared_availability_enabled(&self) -> bool;

    /// Topic to use as the entity's availability topic, if shared
    fn availability_topic(&self) -> Option<&str>;

    fn is_extended_unique_ids_enabled(&self) -> bool;

    fn is_available(&self) -> bool;

    /// Unique ID an entity with the given suffix announces
    fn entity_unique_id<const N: usize>(&self, entity_id: &str) -> Result<String<N>, DeviceError>
    where
        Self: Sized,
    {
        let device_id = self.unique_id().ok_or(DeviceError::MissingUniqueId)?;
        topic::entity_unique_id(device_id, self.is_extended_unique_ids_enabled(), entity_id)
    }

    /// Render the device block into `buf`, returning the number of bytes written
    fn serialize_device(&self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let unique_id = self.unique_id().ok_or(DeviceError::MissingUniqueId)?;
        self.serializer().serialize(unique_id, buf)
    }
}

impl<const ID_CAP: usize, const TOPIC_CAP: usize> DeviceContext for HaDevice<'_, ID_CAP, TOPIC_CAP> {
    fn unique_id(&self) -> Option<&str> {
        HaDevice::unique_id(self)
    }

    fn serializer(&self) -> &DeviceSerializer<'_> {
        HaDevice::serializer(self)
    }

    fn is_shared_availability_enabled(&self) -> bool {
        HaDevice::is_shared_availability_enabled(self)
    }

    fn availability_topic(&self) -> Option<&str> {
        HaDevice::availability_topic(self)
    }

    fn is_extended_unique_ids_enabled(&self) -> bool {
        HaDevice::is_extended_unique_ids_enabled(self)
    }

    fn is_available(&self) -> bool {
        HaDevice::is_available(self)
    }
}
