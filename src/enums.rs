// Closed sets of symbolic values accepted by the instruments.
//
// `token()` is the canonical spelling of each value. Where a vendor spells the same concept
// differently on the wire, the mapping lives with that vendor's dialect in `devices`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

macro_rules! symbolic_enum {
	($(#[$meta:meta])* $name:ident, argument = $argument:literal, expected = $expected:literal,
	 { $($variant:ident => $token:literal),+ $(,)? }) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
		pub enum $name {
			$($variant),+
		}

		impl $name {
			pub const ALL: &'static [$name] = &[$($name::$variant),+];

			pub fn token(self) -> &'static str {
				match self {
					$($name::$variant => $token),+
				}
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.token()) }
		}

		// Accepts either the token or the variant name, ignoring case
		impl FromStr for $name {
			type Err = Error;

			fn from_str(s: &str) -> Result<Self> {
				let s = s.trim();
				Self::ALL.iter()
					.copied()
					.find(|v| v.token().eq_ignore_ascii_case(s) || format!("{:?}", v).eq_ignore_ascii_case(s))
					.ok_or_else(|| Error::InvalidArgumentType {
						argument: $argument,
						expected: $expected,
						received: format!("{:?}", s),
					})
			}
		}
	};
}

symbolic_enum!(AmplitudeUnit, argument = "unit", expected = "an AmplitudeUnit (VPP, VRMS, DBM)", {
	Vpp  => "VPP",
	Vrms => "VRMS",
	Dbm  => "DBM",
});

symbolic_enum!(FrequencyUnit, argument = "unit", expected = "a FrequencyUnit (HZ, KHZ, MHZ)", {
	Hz  => "HZ",
	KHz => "KHZ",
	MHz => "MHZ",
});

symbolic_enum!(Polarity, argument = "polarity", expected = "a Polarity (NORM, INVT)", {
	Normal   => "NORM",
	Inverted => "INVT",
});

symbolic_enum!(
	/// Burst modes of the Rigol DG1000Z family.
	BurstModeRigol, argument = "burst_mode", expected = "a BurstModeRigol (TRIG, INF, GAT)", {
	Triggered => "TRIG",
	Infinity  => "INF",
	Gated     => "GAT",
});

symbolic_enum!(
	/// Burst modes of the Siglent SDG1000X family.
	BurstModeSiglent, argument = "burst_mode", expected = "a BurstModeSiglent (NCYC, GATE)", {
	Ncyc => "NCYC",
	Gate => "GATE",
});

symbolic_enum!(BurstTriggerSource, argument = "trigger_source", expected = "a BurstTriggerSource (INT, EXT, MAN)", {
	Internal => "INT",
	External => "EXT",
	Manual   => "MAN",
});

symbolic_enum!(WaveformType, argument = "waveform_type", expected = "a WaveformType (SIN, SQU, RAMP, PULS, NOIS, DC, ARB)", {
	Sine   => "SIN",
	Square => "SQU",
	Ramp   => "RAMP",
	Pulse  => "PULS",
	Noise  => "NOIS",
	Dc     => "DC",
	Arb    => "ARB",
});

symbolic_enum!(
	/// Both values mean "no termination assumed"; each vendor has its own literal for it.
	OutputLoad, argument = "load", expected = "an OutputLoad (HZ, INF) or a resistance in ohms", {
	HighZ    => "HZ",
	Infinite => "INF",
});

impl Default for AmplitudeUnit {
	fn default() -> Self { AmplitudeUnit::Vpp }
}

impl Default for FrequencyUnit {
	fn default() -> Self { FrequencyUnit::Hz }
}

impl FrequencyUnit {
	pub fn to_hz(self, value:f64) -> f64 {
		match self {
			FrequencyUnit::Hz  => value,
			FrequencyUnit::KHz => value * 1_000.0,
			FrequencyUnit::MHz => value * 1_000_000.0,
		}
	}
}

/// Burst mode for either vendor. Each dialect rejects the other vendor's modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BurstMode {
	Rigol(BurstModeRigol),
	Siglent(BurstModeSiglent),
}

impl From<BurstModeRigol> for BurstMode {
	fn from(m:BurstModeRigol) -> Self { BurstMode::Rigol(m) }
}

impl From<BurstModeSiglent> for BurstMode {
	fn from(m:BurstModeSiglent) -> Self { BurstMode::Siglent(m) }
}

impl fmt::Display for BurstMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BurstMode::Rigol(m)   => write!(f, "BurstModeRigol::{:?}", m),
			BurstMode::Siglent(m) => write!(f, "BurstModeSiglent::{:?}", m),
		}
	}
}

/// Output termination: a resistance in ohms or the high-impedance sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Load {
	Ohms(f64),
	Symbolic(OutputLoad),
}

impl From<OutputLoad> for Load {
	fn from(l:OutputLoad) -> Self { Load::Symbolic(l) }
}

impl From<f64> for Load {
	fn from(ohms:f64) -> Self { Load::Ohms(ohms) }
}

impl From<i32> for Load {
	fn from(ohms:i32) -> Self { Load::Ohms(ohms as f64) }
}

impl From<u32> for Load {
	fn from(ohms:u32) -> Self { Load::Ohms(ohms as f64) }
}

impl fmt::Display for Load {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Load::Ohms(ohms)  => write!(f, "{} ohm", ohms),
			Load::Symbolic(l) => write!(f, "{}", l),
		}
	}
}
