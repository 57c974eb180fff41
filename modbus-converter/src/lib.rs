//! Conversion between device plugin command parameters and raw Modbus register payloads.

//! ## Conversions
//!
//! The library defines
//!
//! - [`codec::encode`] to turn a decimal-digit parameter value into the bytes written to a holding register or coil block, and
//! - [`codec::decode`] to turn a raw device response into the hexadecimal text forwarded to the messaging layer.
//!
//! [`core::Converter`] exposes both at the plugin boundary, taking the device feature map as a YAML document
//! (see [`feature_map::DeviceFeatureMap`]). [`core::ModbusConverter`] is its implementation.
//!
//! ## Value layout
//!
//! A parameter value is read in 2-character chunks, each chunk being the base-10 value of one output byte, i.e. `"07"` is byte `7`.
//! The payload length depends only on the register descriptor:
//! - `holding` - `2 x registerNum` bytes, one 16-bit register per 2 bytes,
//! - `coil` - `registerNum` bytes, one byte per coil.
//!
//! Missing chunks leave their byte at zero and chunks beyond the payload length are ignored.
//!
//! ## Derive macro
//!
//! For convenience it provides the [`derive::InputParams`] macro to declare a command's parameters as a struct.
//! Every field to be sent carries a `modbus` attribute with the following key-values pairs:
//! - `key` - parameter key in the feature map, defaults to the field name,
//! - `ty` - register type, one of `"holding"`, `"coil"`, `"input"` or `"discrete"`,
//! - `cnt` - number of registers (or coils), `u16` integer.
//!
//! Attributed fields must be unsigned integers (`u8`, `u16`, `u32`, `u64`, `u128` or `usize`) and are rendered as decimal digits.
//!
//! The `modbus_doc` attribute is to create documentation (by adding doc attribute) from `modbus` field attributes information.

/// Utilities for encoding parameter values to and decoding device responses from register payloads
pub mod codec;
/// Plugin boundary traits and the Modbus converter
pub mod core;
/// Error types
pub mod error;
/// Device feature map describing the registers behind each parameter
pub mod feature_map;

pub mod derive {
    /// Re-export.
    pub use modbus_converter_derive::{modbus_doc, InputParams};
}
