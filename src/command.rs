// Logical instrument operations and the vendor-independent argument rules.

use std::convert::TryFrom;
use std::fmt;

use crate::enums::{AmplitudeUnit, BurstMode, BurstTriggerSource, FrequencyUnit, Load, Polarity, WaveformType};
use crate::error::{Error, Result};

pub const AMPLITUDE_LIMIT:f64 = 10.0;
pub const PHASE_LIMIT_DEG:f64 = 360.0;

/// Output channel, guaranteed to be 1 or 2 once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Channel(u8);

impl Channel {
	pub const ONE:Channel = Channel(1);
	pub const TWO:Channel = Channel(2);

	pub fn new(n:u8) -> Result<Self> {
		match n {
			1 | 2 => Ok(Channel(n)),
			_     => Err(Error::InvalidChannel(n)),
		}
	}

	pub fn number(self) -> u8 { self.0 }
}

impl TryFrom<u8> for Channel {
	type Error = Error;
	fn try_from(n:u8) -> Result<Self> { Channel::new(n) }
}

impl fmt::Display for Channel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
	Amplitude { channel: Channel, amplitude: f64, unit: AmplitudeUnit },
	Frequency { channel: Channel, frequency: f64, unit: FrequencyUnit },
	Offset { channel: Channel, offset: f64 },
	Phase { channel: Channel, phase: f64 },
	Waveform { channel: Channel, waveform: WaveformType },
	Output { channel: Channel, state: bool },
	OutputLoad { channel: Channel, load: Load },
	Polarity { channel: Channel, polarity: Polarity },
	BurstDelay { channel: Channel, delay: f64 },
	BurstMode { channel: Channel, mode: BurstMode },
	BurstPeriod { channel: Channel, period: f64 },
	BurstState { channel: Channel, state: bool },
	BurstTriggerSource { channel: Channel, source: BurstTriggerSource },
	TriggerBurst { channel: Channel },
	SyncPhase { channel: Channel },
	BasicWaveQuery { channel: Channel },
	Identify,
}

fn finite(argument:&'static str, value:f64) -> Result<f64> {
	if value.is_finite() {
		Ok(value)
	} else {
		Err(Error::InvalidArgumentType{ argument, expected: "a finite number", received: value.to_string() })
	}
}

fn non_negative(argument:&'static str, value:f64) -> Result<()> {
	if finite(argument, value)? < 0.0 {
		return Err(Error::OutOfRange{ argument, value, constraint: "cannot be negative" });
	}
	Ok(())
}

impl Command {

	pub fn name(&self) -> &'static str {
		match self {
			Command::Amplitude{..}          => "set_amplitude",
			Command::Frequency{..}          => "set_frequency",
			Command::Offset{..}             => "set_offset",
			Command::Phase{..}              => "set_phase",
			Command::Waveform{..}           => "set_waveform",
			Command::Output{..}             => "set_output",
			Command::OutputLoad{..}         => "set_output_load",
			Command::Polarity{..}           => "set_polarity",
			Command::BurstDelay{..}         => "set_burst_delay",
			Command::BurstMode{..}          => "set_burst_mode",
			Command::BurstPeriod{..}        => "set_burst_period",
			Command::BurstState{..}         => "set_burst_state",
			Command::BurstTriggerSource{..} => "set_burst_trigger_source",
			Command::TriggerBurst{..}       => "trigger_burst",
			Command::SyncPhase{..}          => "sync_phase",
			Command::BasicWaveQuery{..}     => "get_channel_wave_parameter",
			Command::Identify               => "identify",
		}
	}

	pub fn is_query(&self) -> bool {
		matches!(self, Command::BasicWaveQuery{..} | Command::Identify)
	}

	pub fn channel(&self) -> Option<Channel> {
		match *self {
			Command::Amplitude{ channel, .. }
			| Command::Frequency{ channel, .. }
			| Command::Offset{ channel, .. }
			| Command::Phase{ channel, .. }
			| Command::Waveform{ channel, .. }
			| Command::Output{ channel, .. }
			| Command::OutputLoad{ channel, .. }
			| Command::Polarity{ channel, .. }
			| Command::BurstDelay{ channel, .. }
			| Command::BurstMode{ channel, .. }
			| Command::BurstPeriod{ channel, .. }
			| Command::BurstState{ channel, .. }
			| Command::BurstTriggerSource{ channel, .. }
			| Command::TriggerBurst{ channel }
			| Command::SyncPhase{ channel }
			| Command::BasicWaveQuery{ channel } => Some(channel),
			Command::Identify => None,
		}
	}

	/// Checks the numeric arguments against the rules shared by every vendor.
	///
	/// Symbolic arguments are closed by their types; membership in a particular vendor's
	/// set is checked by that vendor's dialect when formatting.
	pub fn validate(&self) -> Result<()> {
		match *self {
			Command::Amplitude{ amplitude, .. } => {
				if finite("amplitude", amplitude)?.abs() > AMPLITUDE_LIMIT {
					return Err(Error::OutOfRange{ argument: "amplitude", value: amplitude, constraint: "must be between -10 and 10" });
				}
			},
			Command::Phase{ phase, .. } => {
				if finite("phase", phase)?.abs() > PHASE_LIMIT_DEG {
					return Err(Error::OutOfRange{ argument: "phase", value: phase, constraint: "must be between 0 and 360 in magnitude" });
				}
			},
			Command::Frequency{ frequency, .. } => non_negative("frequency", frequency)?,
			Command::BurstDelay{ delay, .. }    => non_negative("delay", delay)?,
			Command::BurstPeriod{ period, .. }  => non_negative("period", period)?,
			Command::Offset{ offset, .. }       => { finite("offset_voltage", offset)?; },
			Command::OutputLoad{ load: Load::Ohms(ohms), .. } => {
				if finite("load", ohms)? <= 0.0 {
					return Err(Error::OutOfRange{ argument: "load", value: ohms, constraint: "must be a positive resistance" });
				}
			},
			_ => { },
		}
		Ok(())
	}

}
