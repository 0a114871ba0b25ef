//! Home Assistant device representation
//!
//! An [`HaDevice`] owns the identity every entity of the firmware is attached
//! to: the unique ID, the registry metadata and the shared availability topic.
//!
//! The device is configured once during startup (either through the setters
//! or through [`DeviceBuilder`]) and afterwards only its availability changes.

use crate::{
    availability::{Availability, AvailabilityState, PublishOutcome},
    config::{AvailabilityConfig, DEFAULT_TOPIC_CAPACITY, DEFAULT_UNIQUE_ID_CAPACITY},
    error::DeviceError,
    serializer::{DeviceMetadata, DeviceSerializer},
    transport::MqttLink,
    unique_id::UniqueId,
};

/// Device registered in the Home Assistant device registry
///
/// # Type Parameters
///
/// - `ID_CAP`: capacity of a unique ID derived from bytes (two chars per byte)
/// - `TOPIC_CAP`: capacity of the shared availability topic
///
/// Metadata strings are borrowed for `'a` and never copied.
#[derive(Debug)]
pub struct HaDevice<
    'a,
    const ID_CAP: usize = DEFAULT_UNIQUE_ID_CAPACITY,
    const TOPIC_CAP: usize = DEFAULT_TOPIC_CAPACITY,
> {
    unique_id: Option<UniqueId<'a, ID_CAP>>,
    serializer: DeviceSerializer<'a>,
    availability: Option<Availability<TOPIC_CAP>>,
    available: bool,
    extended_unique_ids: bool,
}

impl<'a, const ID_CAP: usize, const TOPIC_CAP: usize> HaDevice<'a, ID_CAP, TOPIC_CAP> {
    /// Create a device without a unique ID.
    ///
    /// Entities cannot work until an ID is assigned with [`Self::set_unique_id`].
    pub const fn new() -> Self {
        Self {
            unique_id: None,
            serializer: DeviceSerializer::new(DeviceMetadata::new()),
            availability: None,
            available: true,
            extended_unique_ids: false,
        }
    }

    /// Create a device with a caller-owned unique ID. An empty string counts as no ID.
    pub const fn with_unique_id(unique_id: &'a str) -> Self {
        Self {
            unique_id: if unique_id.is_empty() {
                None
            } else {
                Some(UniqueId::borrowed(unique_id))
            },
            serializer: DeviceSerializer::new(DeviceMetadata::new()),
            availability: None,
            available: true,
            extended_unique_ids: false,
        }
    }

    /// Create a device whose unique ID is the hex encoding of `bytes`.
    ///
    /// Works like [`Self::set_unique_id`]. If encoding fails the device is
    /// created without an ID.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut device = Self::new();
        if let Err(e) = device.set_unique_id(bytes) {
            warn!("ha_device: unique ID not derived: {}", e);
        }
        device
    }

    pub const fn builder() -> DeviceBuilder<'a, ID_CAP, TOPIC_CAP> {
        DeviceBuilder::new()
    }

    /// Returns the unique ID, if one is assigned
    pub fn unique_id(&self) -> Option<&str> {
        self.unique_id.as_ref().map(UniqueId::as_str)
    }

    /// Returns true if the unique ID buffer belongs to the device
    pub fn owns_unique_id(&self) -> bool {
        self.unique_id.as_ref().is_some_and(UniqueId::is_owned)
    }

    /// Serializer used by entities to render the device block
    pub const fn serializer(&self) -> &DeviceSerializer<'a> {
        &self.serializer
    }

    pub const fn is_shared_availability_enabled(&self) -> bool {
        self.availability.is_some()
    }

    pub const fn is_extended_unique_ids_enabled(&self) -> bool {
        self.extended_unique_ids
    }

    /// Availability topic, present once shared availability is enabled
    pub fn availability_topic(&self) -> Option<&str> {
        self.availability.as_ref().map(Availability::topic)
    }

    /// Last availability set by the firmware. Online until told otherwise.
    pub const fn is_available(&self) -> bool {
        self.available
    }

    pub const fn availability_state(&self) -> AvailabilityState {
        match (self.availability.is_some(), self.available) {
            (false, _) => AvailabilityState::Disabled,
            (true, true) => AvailabilityState::Online,
            (true, false) => AvailabilityState::Offline,
        }
    }

    pub const fn name(&self) -> Option<&'a str> {
        self.serializer.metadata().name
    }

    pub const fn manufacturer(&self) -> Option<&'a str> {
        self.serializer.metadata().manufacturer
    }

    pub const fn model(&self) -> Option<&'a str> {
        self.serializer.metadata().model
    }

    pub const fn software_version(&self) -> Option<&'a str> {
        self.serializer.metadata().sw_version
    }

    pub const fn configuration_url(&self) -> Option<&'a str> {
        self.serializer.metadata().configuration_url
    }

    /// Prefix the unique ID of every entity with the device ID. Cannot be undone.
    pub fn enable_extended_unique_ids(&mut self) {
        self.extended_unique_ids = true;
    }

    /// Assign the unique ID from raw bytes, two lowercase hex digits per byte.
    ///
    /// The ID can only be assigned once, either here or at construction.
    /// On error the device is left unchanged.
    pub fn set_unique_id(&mut self, bytes: &[u8]) -> Result<(), DeviceError> {
        if self.unique_id.is_some() {
            return Err(DeviceError::UniqueIdAlreadySet);
        }
        let unique_id = UniqueId::from_bytes(bytes)?;
        debug!("ha_device: unique ID set to {}", unique_id.as_str());
        self.unique_id = Some(unique_id);
        Ok(())
    }

    /// Same as [`Self::set_unique_id`], reporting only success
    pub fn try_set_unique_id(&mut self, bytes: &[u8]) -> bool {
        self.set_unique_id(bytes).is_ok()
    }

    pub fn set_name(&mut self, name: &'a str) {
        self.serializer.metadata_mut().name = Some(name);
    }

    pub fn set_manufacturer(&mut self, manufacturer: &'a str) {
        self.serializer.metadata_mut().manufacturer = Some(manufacturer);
    }

    pub fn set_model(&mut self, model: &'a str) {
        self.serializer.metadata_mut().model = Some(model);
    }

    pub fn set_software_version(&mut self, software_version: &'a str) {
        self.serializer.metadata_mut().sw_version = Some(software_version);
    }

    pub fn set_configuration_url(&mut self, url: &'a str) {
        self.serializer.metadata_mut().configuration_url = Some(url);
    }

    /// Alias of [`Self::set_configuration_url`]
    pub fn set_url(&mut self, url: &'a str) {
        self.set_configuration_url(url);
    }

    /// Enable shared availability with the default data prefix
    pub fn enable_shared_availability(&mut self) -> Result<(), DeviceError> {
        self.enable_shared_availability_with(&AvailabilityConfig::new())
    }

    /// Enable shared availability: one availability topic for all entities.
    ///
    /// Requires a unique ID. Calling it again once enabled succeeds and keeps
    /// the existing topic.
    pub fn enable_shared_availability_with(
        &mut self,
        config: &AvailabilityConfig<'_>,
    ) -> Result<(), DeviceError> {
        if self.availability.is_some() {
            return Ok(());
        }
        let unique_id = self.unique_id().ok_or(DeviceError::MissingUniqueId)?;
        let availability = Availability::new(config, unique_id)?;
        info!("ha_device: shared availability on {}", availability.topic());
        self.availability = Some(availability);
        Ok(())
    }

    /// Same as [`Self::enable_shared_availability`], reporting only success
    pub fn try_enable_shared_availability(&mut self) -> bool {
        self.enable_shared_availability().is_ok()
    }

    /// Register the "offline" last will on the availability topic.
    ///
    /// Shared availability must be enabled first, and the link must not be
    /// connected yet for the broker to pick the will up.
    pub fn enable_last_will<L: MqttLink + ?Sized>(&self, link: &mut L) -> Result<(), DeviceError> {
        let availability = self
            .availability
            .as_ref()
            .ok_or(DeviceError::SharedAvailabilityDisabled)?;
        link.set_last_will(availability.last_will());
        Ok(())
    }

    /// Record the availability and publish it right away if possible.
    ///
    /// When shared availability is disabled or the link is down the value is
    /// only recorded; [`Self::publish_availability`] sends it later.
    pub fn set_availability<L: MqttLink + ?Sized>(
        &mut self,
        online: bool,
        link: &mut L,
    ) -> PublishOutcome {
        self.available = online;
        self.publish_availability(link)
    }

    /// Publish the current availability, retained.
    ///
    /// No-op if shared availability is disabled or the link is down.
    pub fn publish_availability<L: MqttLink + ?Sized>(&self, link: &mut L) -> PublishOutcome {
        match &self.availability {
            Some(availability) => availability.publish(self.available, link),
            None => PublishOutcome::Skipped,
        }
    }

    /// Hook for the MQTT client, called after every (re)connect.
    ///
    /// Re-asserts availability: the broker may have lost the retained message
    /// or fired the last will during the outage.
    pub fn on_transport_connected<L: MqttLink + ?Sized>(&self, link: &mut L) -> PublishOutcome {
        trace!("ha_device: transport connected");
        self.publish_availability(link)
    }
}

impl<const ID_CAP: usize, const TOPIC_CAP: usize> Default for HaDevice<'_, ID_CAP, TOPIC_CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
enum IdSource<'a> {
    None,
    Str(&'a str),
    Bytes(&'a [u8]),
}

/// Builder for [`HaDevice`]
///
/// Collects the whole startup configuration and produces a device in one
/// step, so the unique ID is fixed before anything can observe the device.
///
/// ```ignore
/// const DEVICE: DeviceBuilder<'static> = DeviceBuilder::new()
///     .unique_id("desk_lamp")
///     .name("Desk Lamp")
///     .manufacturer("MyrtIO")
///     .shared_availability();
///
/// let device: HaDevice<'static> = DEVICE.build()?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeviceBuilder<
    'a,
    const ID_CAP: usize = DEFAULT_UNIQUE_ID_CAPACITY,
    const TOPIC_CAP: usize = DEFAULT_TOPIC_CAPACITY,
> {
    id: IdSource<'a>,
    metadata: DeviceMetadata<'a>,
    availability: Option<AvailabilityConfig<'a>>,
    extended_unique_ids: bool,
}

impl<'a, const ID_CAP: usize, const TOPIC_CAP: usize> DeviceBuilder<'a, ID_CAP, TOPIC_CAP> {
    pub const fn new() -> Self {
        Self {
            id: IdSource::None,
            metadata: DeviceMetadata::new(),
            availability: None,
            extended_unique_ids: false,
        }
    }

    /// Use a caller-owned unique ID
    #[must_use]
    pub const fn unique_id(mut self, unique_id: &'a str) -> Self {
        self.id = IdSource::Str(unique_id);
        self
    }

    /// Derive the unique ID from raw bytes (e.g. a MAC address)
    #[must_use]
    pub const fn unique_id_bytes(mut self, bytes: &'a [u8]) -> Self {
        self.id = IdSource::Bytes(bytes);
        self
    }

    #[must_use]
    pub const fn name(mut self, name: &'a str) -> Self {
        self.metadata.name = Some(name);
        self
    }

    #[must_use]
    pub const fn manufacturer(mut self, manufacturer: &'a str) -> Self {
        self.metadata.manufacturer = Some(manufacturer);
        self
    }

    #[must_use]
    pub const fn model(mut self, model: &'a str) -> Self {
        self.metadata.model = Some(model);
        self
    }

    #[must_use]
    pub const fn software_version(mut self, software_version: &'a str) -> Self {
        self.metadata.sw_version = Some(software_version);
        self
    }

    #[must_use]
    pub const fn configuration_url(mut self, url: &'a str) -> Self {
        self.metadata.configuration_url = Some(url);
        self
    }

    #[must_use]
    pub const fn extended_unique_ids(mut self) -> Self {
        self.extended_unique_ids = true;
        self
    }

    /// Enable shared availability with the default data prefix
    #[must_use]
    pub const fn shared_availability(mut self) -> Self {
        self.availability = Some(AvailabilityConfig::new());
        self
    }

    /// Enable shared availability with a custom configuration
    #[must_use]
    pub const fn shared_availability_with(mut self, config: AvailabilityConfig<'a>) -> Self {
        self.availability = Some(config);
        self
    }

    /// Build the device.
    ///
    /// Fails if the unique ID cannot be derived, or if shared availability is
    /// requested without a unique ID.
    pub fn build(self) -> Result<HaDevice<'a, ID_CAP, TOPIC_CAP>, DeviceError> {
        let mut device = match self.id {
            IdSource::None => HaDevice::new(),
            IdSource::Str(unique_id) => HaDevice::with_unique_id(unique_id),
            IdSource::Bytes(bytes) => {
                let mut device = HaDevice::new();
                device.set_unique_id(bytes)?;
                device
            }
        };
        *device.serializer.metadata_mut() = self.metadata;
        device.extended_unique_ids = self.extended_unique_ids;
        if let Some(config) = &self.availability {
            device.enable_shared_availability_with(config)?;
        }
        Ok(device)
    }
}

impl<const ID_CAP: usize, const TOPIC_CAP: usize> Default for DeviceBuilder<'_, ID_CAP, TOPIC_CAP> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Device<'a> = HaDevice<'a, 8, 32>;

    #[test]
    fn new_device_has_no_identity() {
        let device = Device::new();

        assert_eq!(device.unique_id(), None);
        assert!(!device.owns_unique_id());
        assert!(device.is_available());
        assert_eq!(device.availability_state(), AvailabilityState::Disabled);
    }

    #[test]
    fn empty_string_id_is_no_id() {
        let mut device = Device::with_unique_id("");

        assert_eq!(device.unique_id(), None);
        assert!(device.set_unique_id(&[0x01]).is_ok());
    }

    #[test]
    fn from_bytes_over_capacity_leaves_device_without_id() {
        let device = Device::from_bytes(&[0; 5]);

        assert_eq!(device.unique_id(), None);
        assert!(!device.owns_unique_id());
    }

    #[test]
    fn failed_topic_composition_keeps_feature_disabled() {
        let mut device: HaDevice<'_, 8, 8> = HaDevice::with_unique_id("ab01");

        assert_eq!(
            device.enable_shared_availability(),
            Err(DeviceError::CapacityExceeded)
        );
        assert!(!device.is_shared_availability_enabled());
        assert_eq!(device.availability_topic(), None);
    }

    #[test]
    fn set_url_is_configuration_url() {
        let mut device = Device::new();
        device.set_url("http://a");
        assert_eq!(device.configuration_url(), Some("http://a"));

        device.set_configuration_url("http://b");
        assert_eq!(device.configuration_url(), Some("http://b"));
    }

    #[test]
    fn builder_rejects_availability_without_id() {
        let result = Device::builder().shared_availability().build();
        assert_eq!(result.err(), Some(DeviceError::MissingUniqueId));
    }
}
