use tracing::{debug, trace};

use crate::codec;
use crate::error::{EncodeError, Result};
use crate::feature_map::{DeviceFeatureMap, Values};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Messages produced for a command issued to a device.
pub struct IssueMessages {
    /// Device-bound payloads, one per encoded input parameter.
    pub input_messages: Vec<Vec<u8>>,
    /// Expected device report payloads for the output parameters.
    pub output_messages: Vec<Vec<u8>>,
    pub issue_topic: String,
    pub issue_response_topic: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Device response converted for the messaging layer.
pub struct Report {
    pub topic: String,
    pub data: Vec<u8>,
}

/// Plugin boundary converting between command parameters and device messages.
pub trait Converter {
    /// Convert the command `values` to the messages a device understands.
    ///
    /// `feature_map` is the YAML [`DeviceFeatureMap`] of the device model.
    fn convert_issue_message(
        &self,
        device_id: &str,
        model_id: &str,
        feature_id: &str,
        values: &Values,
        feature_map: &str,
    ) -> Result<IssueMessages>;

    /// Convert the responses of an issued command to the messaging layer format.
    fn convert_device_messages(&self, messages: &[Vec<u8>], feature_map: &str) -> Result<Report>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Which writable parameters of a command are encoded.
pub enum Selection {
    /// Only the first writable parameter, in key order.
    #[default]
    First,
    /// Every writable parameter, one payload each.
    All,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ModbusConverter {
    selection: Selection,
}

impl ModbusConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Encode the writable parameters of `values`.
    ///
    /// Parameters missing from `feature_map`, living in read-only tables or of unknown register type are skipped.
    /// Fails with [`EncodeError::NoMessages`] if nothing was encoded.
    pub fn encode_values(
        &self,
        values: &Values,
        feature_map: &DeviceFeatureMap,
    ) -> std::result::Result<Vec<Vec<u8>>, EncodeError> {
        let mut messages = Vec::new();
        for (key, value) in values {
            trace!(%key, "scanning parameter");
            let Some(descriptor) = feature_map
                .descriptor(key)
                .filter(|descriptor| descriptor.payload_len().is_some())
            else {
                trace!(%key, "parameter has no writable registers, skipping");
                continue;
            };

            messages.push(codec::encode(key, value, descriptor)?);
            if self.selection == Selection::First {
                break;
            }
        }

        if messages.is_empty() {
            return Err(EncodeError::NoMessages);
        }
        Ok(messages)
    }
}

impl Converter for ModbusConverter {
    fn convert_issue_message(
        &self,
        device_id: &str,
        model_id: &str,
        feature_id: &str,
        values: &Values,
        feature_map: &str,
    ) -> Result<IssueMessages> {
        let feature_map = DeviceFeatureMap::from_yaml(feature_map)?;
        debug!(device_id, model_id, feature_id, ?values, "converting issue message");
        debug!(?feature_map, "parsed device feature map");

        let input_messages = self.encode_values(values, &feature_map)?;

        Ok(IssueMessages {
            input_messages,
            ..Default::default()
        })
    }

    fn convert_device_messages(&self, messages: &[Vec<u8>], _feature_map: &str) -> Result<Report> {
        let data = codec::decode(messages)?;

        Ok(Report {
            topic: String::new(),
            data: data.into_bytes(),
        })
    }
}

/// Typed declaration of a command's input parameters.
///
/// Usually implemented with [`crate::derive::InputParams`].
pub trait InputParams {
    /// Registers behind each parameter.
    fn feature_map() -> DeviceFeatureMap;

    /// Current parameter values as decimal digits.
    fn values(&self) -> Values;

    fn encode_with(
        &self,
        converter: &ModbusConverter,
    ) -> std::result::Result<Vec<Vec<u8>>, EncodeError>
    where
        Self: Sized,
    {
        converter.encode_values(&self.values(), &Self::feature_map())
    }
}
