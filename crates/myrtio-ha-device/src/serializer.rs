//! Device block serializer
//!
//! Every entity discovery payload embeds the same `device` object. The
//! serializer keeps the metadata it is rendered from, so entities only need a
//! reference to it and the device's unique ID.

use serde::Serialize;

use crate::error::DeviceError;

/// Device information for Home Assistant discovery payload
#[derive(Debug, Clone, Serialize)]
pub struct HaDeviceInfo<'a> {
    /// Device identifiers array
    pub identifiers: &'a [&'a str],
    /// Human-readable device name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'a str>,
    /// Manufacturer name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<&'a str>,
    /// Model name (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<&'a str>,
    /// Software version (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<&'a str>,
    /// Configuration page of the device (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration_url: Option<&'a str>,
}

/// Device metadata shown in the Home Assistant device registry.
///
/// Strings are borrowed, never copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceMetadata<'a> {
    pub name: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub model: Option<&'a str>,
    pub sw_version: Option<&'a str>,
    pub configuration_url: Option<&'a str>,
}

impl DeviceMetadata<'_> {
    pub const fn new() -> Self {
        Self {
            name: None,
            manufacturer: None,
            model: None,
            sw_version: None,
            configuration_url: None,
        }
    }
}

/// Renders the device block of discovery payloads
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSerializer<'a> {
    metadata: DeviceMetadata<'a>,
}

impl<'a> DeviceSerializer<'a> {
    pub const fn new(metadata: DeviceMetadata<'a>) -> Self {
        Self { metadata }
    }

    pub const fn metadata(&self) -> &DeviceMetadata<'a> {
        &self.metadata
    }

    pub(crate) fn metadata_mut(&mut self) -> &mut DeviceMetadata<'a> {
        &mut self.metadata
    }

    /// Build the wire representation for the given identifiers
    pub fn device_info<'s>(&'s self, identifiers: &'s [&'s str]) -> HaDeviceInfo<'s> {
        HaDeviceInfo {
            identifiers,
            name: self.metadata.name,
            manufacturer: self.metadata.manufacturer,
            model: self.metadata.model,
            sw_version: self.metadata.sw_version,
            configuration_url: self.metadata.configuration_url,
        }
    }

    /// Serialize the device block into `buf`, returning the number of bytes written
    pub fn serialize(&self, unique_id: &str, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let identifiers = [unique_id];
        let info = self.device_info(&identifiers);
        serde_json_core::to_slice(&info, buf).map_err(|_| DeviceError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_missing_fields() {
        let serializer = DeviceSerializer::new(DeviceMetadata {
            name: Some("Desk Lamp"),
            ..DeviceMetadata::new()
        });
        let mut buf = [0u8; 128];

        let len = serializer.serialize("ab01", &mut buf).unwrap();

        assert_eq!(
            core::str::from_utf8(&buf[..len]).unwrap(),
            r#"{"identifiers":["ab01"],"name":"Desk Lamp"}"#
        );
    }

    #[test]
    fn renders_all_fields_in_order() {
        let serializer = DeviceSerializer::new(DeviceMetadata {
            name: Some("Lamp"),
            manufacturer: Some("MyrtIO"),
            model: Some("L1"),
            sw_version: Some("1.0.0"),
            configuration_url: Some("http://10.0.0.2"),
        });
        let mut buf = [0u8; 256];

        let len = serializer.serialize("ab01", &mut buf).unwrap();

        assert_eq!(
            core::str::from_utf8(&buf[..len]).unwrap(),
            concat!(
                r#"{"identifiers":["ab01"],"name":"Lamp","manufacturer":"MyrtIO","#,
                r#""model":"L1","sw_version":"1.0.0","configuration_url":"http://10.0.0.2"}"#
            )
        );
    }

    #[test]
    fn small_buffer_is_an_error() {
        let serializer = DeviceSerializer::default();
        let mut buf = [0u8; 8];

        assert_eq!(
            serializer.serialize("ab01", &mut buf),
            Err(DeviceError::Serialization)
        );
    }
}
