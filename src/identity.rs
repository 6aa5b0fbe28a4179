
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

lazy_static! {
	static ref IDN_RE: Regex = Regex::new(r"^\s*([^,]+),([^,]+),([^,]*),([^,\s]+)\s*$").unwrap();
}

/// Answer to `*IDN?`: manufacturer, model, serial number, firmware version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub manufacturer: String,
	pub model: String,
	pub serial_num: String,
	pub fw_version: String,
}

impl Identity {

	pub fn parse(response:&str) -> Result<Self> {
		let caps = IDN_RE.captures(response).ok_or_else(|| Error::MalformedResponse(response.to_owned()))?;
		let field = |i:usize| caps.get(i).map(|m| m.as_str().trim().to_owned()).unwrap_or_default();

		Ok(Identity{
			manufacturer: field(1),
			model: field(2),
			serial_num: field(3),
			fw_version: field(4),
		})
	}

	// Models come in families (SDG1032X, SDG1062X, ...), so a substring match is enough
	pub fn is_model(&self, expected:&str) -> bool {
		self.model.to_ascii_uppercase().contains(&expected.to_ascii_uppercase())
	}

}
