//! Connection settings for one instrument, loadable from JSON.
//!
//! ```json
//! {
//!     "address": "192.168.1.50",
//!     "vendor": "siglent",
//!     "transport": { "kind": "socket", "port": 5025 },
//!     "io_timeout_ms": 5000,
//!     "expect_model": "SDG10"
//! }
//! ```
//!
//! Only `address` and `vendor` are required. The transport defaults to VXI-11 located
//! through the port mapper.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::devices::Vendor;
use crate::error::{Error, Result};

pub const DEFAULT_IO_TIMEOUT_MS:u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TransportConfig {
	/// VXI-11. `core_port` skips the port mapper lookup.
	Vxi11 {
		#[serde(default)]
		core_port: Option<u16>,
	},
	/// Raw SCPI socket.
	Socket {
		port: u16,
	},
}

impl Default for TransportConfig {
	fn default() -> Self { TransportConfig::Vxi11{ core_port: None } }
}

fn default_io_timeout_ms() -> u64 { DEFAULT_IO_TIMEOUT_MS }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwgConfig {
	pub address: String,
	pub vendor: Vendor,
	#[serde(default)]
	pub transport: TransportConfig,
	#[serde(default = "default_io_timeout_ms")]
	pub io_timeout_ms: u64,
	/// When set, `*IDN?` must report a model containing this string.
	#[serde(default)]
	pub expect_model: Option<String>,
}

impl AwgConfig {

	pub fn new(address:&str, vendor:Vendor) -> Self {
		AwgConfig{
			address: address.to_owned(),
			vendor,
			transport: TransportConfig::default(),
			io_timeout_ms: DEFAULT_IO_TIMEOUT_MS,
			expect_model: None,
		}
	}

	pub fn from_json_str(s:&str) -> Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	pub fn load<P: AsRef<Path>>(path:P) -> Result<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|source| Error::ConfigFile{ path: path.to_owned(), source })?;
		Self::from_json_str(&text)
	}

	/// `None` when the timeout is zero, meaning block indefinitely.
	pub fn io_timeout(&self) -> Option<Duration> {
		if self.io_timeout_ms == 0 { None } else { Some(Duration::from_millis(self.io_timeout_ms)) }
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn minimal_config_gets_defaults() {
		let cfg = AwgConfig::from_json_str(r#"{ "address": "10.0.0.7", "vendor": "rigol" }"#).unwrap();
		assert_eq!(cfg, AwgConfig::new("10.0.0.7", Vendor::Rigol));
		assert_eq!(cfg.io_timeout(), Some(Duration::from_secs(10)));
	}

	#[test]
	fn full_config() {
		let cfg = AwgConfig::from_json_str(r#"{
			"address": "192.168.1.50",
			"vendor": "siglent",
			"transport": { "kind": "socket", "port": 5025 },
			"io_timeout_ms": 0,
			"expect_model": "SDG10"
		}"#).unwrap();
		assert_eq!(cfg.vendor, Vendor::Siglent);
		assert_eq!(cfg.transport, TransportConfig::Socket{ port: 5025 });
		assert_eq!(cfg.io_timeout(), None);
		assert_eq!(cfg.expect_model.as_deref(), Some("SDG10"));
	}

	#[test]
	fn unknown_vendor_is_rejected() {
		assert!(matches!(
			AwgConfig::from_json_str(r#"{ "address": "a", "vendor": "tektronix" }"#),
			Err(Error::Config(_))
		));
	}

	#[test]
	fn loads_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{ "address": "10.0.0.9", "vendor": "siglent", "transport": {{ "kind": "vxi11", "core_port": 9009 }} }}"#).unwrap();

		let cfg = AwgConfig::load(file.path()).unwrap();
		assert_eq!(cfg.transport, TransportConfig::Vxi11{ core_port: Some(9009) });
	}

	#[test]
	fn missing_file_names_the_path() {
		match AwgConfig::load("/nonexistent/awg.json") {
			Err(Error::ConfigFile{ path, .. }) => assert!(path.ends_with("awg.json")),
			other => panic!("unexpected {:?}", other),
		}
	}
}
