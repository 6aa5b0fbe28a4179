//! Read-back of a channel's basic waveform settings.
//!
//! Siglent instruments answer `C<n>:BSWV?` with a header followed by a flat, comma
//! separated list of alternating keys and values:
//!
//! ```text
//! C1:BSWV WVTP,SINE,FRQ,1000HZ,PERI,0.001S,AMP,4V,AMPVRMS,1.414Vrms,OFST,0V,HLEV,2V,LLEV,-2V,PHSE,0
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Parameters that can be read back from a basic-wave query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaveParameter {
	WaveformType,
	Frequency,
	Period,
	Amplitude,
	Offset,
	HighLevel,
	LowLevel,
	Phase,
}

impl WaveParameter {
	pub const ALL: [WaveParameter; 8] = [
		WaveParameter::WaveformType,
		WaveParameter::Frequency,
		WaveParameter::Period,
		WaveParameter::Amplitude,
		WaveParameter::Offset,
		WaveParameter::HighLevel,
		WaveParameter::LowLevel,
		WaveParameter::Phase,
	];

	/// Key used in the instrument's response.
	pub fn key(self) -> &'static str {
		match self {
			WaveParameter::WaveformType => "WVTP",
			WaveParameter::Frequency    => "FRQ",
			WaveParameter::Period       => "PERI",
			WaveParameter::Amplitude    => "AMP",
			WaveParameter::Offset       => "OFST",
			WaveParameter::HighLevel    => "HLEV",
			WaveParameter::LowLevel     => "LLEV",
			WaveParameter::Phase        => "PHSE",
		}
	}

	pub fn name(self) -> &'static str {
		match self {
			WaveParameter::WaveformType => "waveform_type",
			WaveParameter::Frequency    => "frequency",
			WaveParameter::Period       => "period",
			WaveParameter::Amplitude    => "amplitude",
			WaveParameter::Offset       => "offset",
			WaveParameter::HighLevel    => "high_level",
			WaveParameter::LowLevel     => "low_level",
			WaveParameter::Phase        => "phase",
		}
	}
}

impl fmt::Display for WaveParameter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for WaveParameter {
	type Err = Error;

	fn from_str(s:&str) -> Result<Self> {
		WaveParameter::ALL.iter()
			.copied()
			.find(|p| p.name() == s)
			.ok_or_else(|| Error::InvalidArgumentType{
				argument: "parameter",
				expected: "one of waveform_type, frequency, period, amplitude, offset, high_level, low_level, phase",
				received: format!("{:?}", s),
			})
	}
}

/// Key/value pairs of one basic-wave response, in the order the instrument sent them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicWave {
	header: String,
	pairs: Vec<(String, String)>,
}

impl BasicWave {

	pub fn parse(response:&str) -> Result<Self> {
		let malformed = || Error::MalformedResponse(response.to_owned());

		let mut parts = response.trim().splitn(2, char::is_whitespace);
		let header = parts.next().filter(|h| !h.is_empty()).ok_or_else(malformed)?;
		let body = parts.next()
			.map(|b| b.trim().trim_matches('\'').trim_matches('"'))
			.filter(|b| !b.is_empty())
			.ok_or_else(malformed)?;

		let fields:Vec<&str> = body.split(',').map(str::trim).collect();
		if fields.len() < 2 {
			return Err(malformed());
		}

		// A trailing key without a value is dropped
		let pairs = fields.chunks_exact(2)
			.map(|kv| (kv[0].to_owned(), kv[1].to_owned()))
			.collect();

		Ok(BasicWave{ header: header.to_owned(), pairs })
	}

	pub fn header(&self) -> &str { &self.header }

	pub fn value(&self, key:&str) -> Option<&str> {
		self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Raw value of `parameter`, units included (e.g. `1000HZ`).
	pub fn get(&self, parameter:WaveParameter) -> Result<&str> {
		self.value(parameter.key()).ok_or(Error::MissingParameter(parameter.key()))
	}

	/// Numeric part of `parameter` with any unit suffix removed.
	pub fn number(&self, parameter:WaveParameter) -> Result<f64> {
		let raw = self.get(parameter)?;
		let digits = raw.trim_end_matches(|c:char| c.is_ascii_alphabetic());
		digits.parse::<f64>().map_err(|_| Error::MalformedResponse(raw.to_owned()))
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

}

#[cfg(test)]
mod tests {
	use super::*;

	const RESPONSE:&str = "C1:BSWV WVTP,SQUARE,FRQ,1000HZ,PERI,0.001S,AMP,4V,AMPVRMS,2Vrms,OFST,0.5V,HLEV,2.5V,LLEV,-1.5V,PHSE,90,DUTY,50\n";

	#[test]
	fn every_parameter_is_found() {
		let wave = BasicWave::parse(RESPONSE).unwrap();
		assert_eq!(wave.header(), "C1:BSWV");

		let expected = ["SQUARE", "1000HZ", "0.001S", "4V", "0.5V", "2.5V", "-1.5V", "90"];
		for (p, e) in WaveParameter::ALL.iter().zip(expected.iter()) {
			assert_eq!(wave.get(*p).unwrap(), *e, "{}", p);
		}
	}

	#[test]
	fn numbers_lose_their_units() {
		let wave = BasicWave::parse(RESPONSE).unwrap();
		assert_eq!(wave.number(WaveParameter::Frequency).unwrap(), 1000.0);
		assert_eq!(wave.number(WaveParameter::LowLevel).unwrap(), -1.5);
		assert!(wave.number(WaveParameter::WaveformType).is_err());
	}

	#[test]
	fn absent_key_is_an_error() {
		let wave = BasicWave::parse("C2:BSWV WVTP,DC,OFST,1V").unwrap();
		assert_eq!(wave.get(WaveParameter::Offset).unwrap(), "1V");
		assert!(matches!(wave.get(WaveParameter::Frequency), Err(Error::MissingParameter("FRQ"))));
	}

	#[test]
	fn response_without_body_is_malformed() {
		assert!(matches!(BasicWave::parse("C1:BSWV"), Err(Error::MalformedResponse(_))));
		assert!(matches!(BasicWave::parse(""), Err(Error::MalformedResponse(_))));
		assert!(matches!(BasicWave::parse("C1:BSWV WVTP"), Err(Error::MalformedResponse(_))));
	}

	#[test]
	fn parameter_names_parse() {
		assert_eq!("high_level".parse::<WaveParameter>().unwrap(), WaveParameter::HighLevel);
		assert!("duty".parse::<WaveParameter>().is_err());
	}
}
