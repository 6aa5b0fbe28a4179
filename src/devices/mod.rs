
// One dialect per vendor. Each turns a validated `Command` into the exact text its
// instruments expect; everything else (validation, dispatch, error reporting) is shared.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::command::Command;
use crate::error::{Error, Result};

pub mod basic_wave;
pub mod dg1000z;
pub mod sdg1000x;

pub use basic_wave::{BasicWave, WaveParameter};
pub use dg1000z::DG1000Z;
pub use sdg1000x::SDG1000X;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
	Rigol,
	Siglent,
}

impl Vendor {
	pub fn dialect(self) -> &'static dyn VendorDialect {
		match self {
			Vendor::Rigol   => &DG1000Z,
			Vendor::Siglent => &SDG1000X,
		}
	}
}

impl fmt::Display for Vendor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Vendor::Rigol   => "Rigol",
			Vendor::Siglent => "Siglent",
		})
	}
}

pub trait VendorDialect: Send + Sync {

	fn vendor(&self) -> Vendor;

	/// Literal sent for `OutputLoad::HighZ` / `OutputLoad::Infinite`.
	fn infinite_load_token(&self) -> &'static str;

	/// Command text for an already validated command.
	fn format(&self, command:&Command) -> Result<String>;

	/// Parses the response to this vendor's basic-wave query.
	fn parse_basic_wave(&self, response:&str) -> Result<BasicWave> {
		let _ = response;
		Err(self.unsupported("get_channel_wave_parameter"))
	}

	/// Validates, then formats. Nothing is produced for an invalid command.
	fn render(&self, command:&Command) -> Result<String> {
		command.validate()?;
		self.format(command)
	}

	fn unsupported(&self, operation:&'static str) -> Error {
		Error::Unsupported{ operation, vendor: self.vendor() }
	}

}

pub(crate) fn on_off(state:bool) -> &'static str { if state { "ON" } else { "OFF" } }
