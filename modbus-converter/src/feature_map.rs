use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tokio_modbus::Quantity;

/// Parameter key to its decimal-digit value.
///
/// Ordered, so scanning the values is deterministic.
pub type Values = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
/// Modbus data table a parameter lives in.
pub enum RegisterType {
    Holding,
    Coil,
    Input,
    Discrete,
    /// Missing or unrecognized register type, never encoded.
    #[default]
    Unknown,
}

impl From<String> for RegisterType {
    fn from(value: String) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "holding" => RegisterType::Holding,
            "coil" => RegisterType::Coil,
            "input" => RegisterType::Input,
            "discrete" => RegisterType::Discrete,
            _ => RegisterType::Unknown,
        }
    }
}

impl RegisterType {
    /// Payload bytes taken by a single register (or coil), `None` for read-only or unknown tables.
    pub const fn unit_size(self) -> Option<usize> {
        match self {
            RegisterType::Holding => Some(2),
            RegisterType::Coil => Some(1),
            RegisterType::Input | RegisterType::Discrete | RegisterType::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Registers backing a single parameter.
pub struct RegisterDescriptor {
    #[serde(default)]
    pub register_type: RegisterType,
    #[serde(default, rename = "registerNum", alias = "registerCount")]
    pub register_count: Quantity,
}

impl RegisterDescriptor {
    pub const fn new(register_type: RegisterType, register_count: Quantity) -> Self {
        Self {
            register_type,
            register_count,
        }
    }

    pub const fn holding(register_count: Quantity) -> Self {
        Self::new(RegisterType::Holding, register_count)
    }

    pub const fn coil(register_count: Quantity) -> Self {
        Self::new(RegisterType::Coil, register_count)
    }

    /// Exact length of the encoded payload, `None` if the register type cannot be written.
    pub fn payload_len(&self) -> Option<usize> {
        self.register_type
            .unit_size()
            .map(|size| size * usize::from(self.register_count))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Device feature map, as handed over by the host with every conversion request.
pub struct DeviceFeatureMap {
    #[serde(default)]
    pub input_param_id_map: HashMap<String, RegisterDescriptor>,
}

impl DeviceFeatureMap {
    pub fn from_yaml(document: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(document)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Add (or replace) the descriptor of an input parameter.
    pub fn with_param(mut self, key: impl Into<String>, descriptor: RegisterDescriptor) -> Self {
        self.input_param_id_map.insert(key.into(), descriptor);
        self
    }

    pub fn descriptor(&self, key: &str) -> Option<&RegisterDescriptor> {
        self.input_param_id_map.get(key)
    }
}

impl FromStr for DeviceFeatureMap {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_yaml(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = "
inputParamIdMap:
  speed:
    registerType: holding
    registerNum: 2
  enable:
    registerType: Coil
    registerNum: 1
  temperature:
    registerType: input
    registerNum: 1
";

    #[test]
    fn test_from_yaml() {
        let map = DeviceFeatureMap::from_yaml(DOCUMENT).unwrap();

        assert_eq!(map.input_param_id_map.len(), 3);
        assert_eq!(map.descriptor("speed"), Some(&RegisterDescriptor::holding(2)));
        assert_eq!(map.descriptor("enable"), Some(&RegisterDescriptor::coil(1)));
        assert_eq!(
            map.descriptor("temperature"),
            Some(&RegisterDescriptor::new(RegisterType::Input, 1))
        );
        assert_eq!(map.descriptor("missing"), None);
    }

    #[test]
    fn test_unknown_or_missing_register_type_is_not_writable() {
        let document = "
inputParamIdMap:
  analog:
    registerType: analog
    registerNum: 2
  bare:
    registerNum: 1
  empty: {}
";
        let map: DeviceFeatureMap = document.parse().unwrap();

        assert_eq!(
            map.descriptor("analog"),
            Some(&RegisterDescriptor::new(RegisterType::Unknown, 2))
        );
        assert_eq!(
            map.descriptor("bare"),
            Some(&RegisterDescriptor::new(RegisterType::Unknown, 1))
        );
        assert_eq!(
            map.descriptor("empty"),
            Some(&RegisterDescriptor::new(RegisterType::Unknown, 0))
        );
        for key in ["analog", "bare", "empty"] {
            assert_eq!(map.descriptor(key).unwrap().payload_len(), None, "{key}");
        }
    }

    #[test]
    fn test_yaml_round_trip_keeps_wire_names() {
        let map = DeviceFeatureMap::default().with_param("speed", RegisterDescriptor::holding(4));
        let yaml = map.to_yaml().unwrap();

        assert!(yaml.contains("inputParamIdMap"));
        assert!(yaml.contains("registerNum: 4"));
        assert_eq!(DeviceFeatureMap::from_yaml(&yaml).unwrap(), map);
    }

    #[test]
    fn test_payload_len() {
        for (descriptor, expected) in [
            (RegisterDescriptor::holding(0), Some(0)),
            (RegisterDescriptor::holding(3), Some(6)),
            (RegisterDescriptor::coil(3), Some(3)),
            (RegisterDescriptor::new(RegisterType::Input, 3), None),
            (RegisterDescriptor::new(RegisterType::Discrete, 3), None),
            (RegisterDescriptor::new(RegisterType::Unknown, 3), None),
        ] {
            assert_eq!(descriptor.payload_len(), expected, "{descriptor:?}");
        }
    }
}
