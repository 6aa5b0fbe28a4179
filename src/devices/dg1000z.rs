
// Rigol DG1000Z: flat SCPI tree rooted at SOURce<n>, units appended to the number.

use crate::command::Command;
use crate::enums::{BurstMode, Load, Polarity};
use crate::error::{Error, Result};

use super::{on_off, Vendor, VendorDialect};

pub const INFINITE_LOAD:&str = "INF";

pub struct DG1000Z;

fn polarity_token(p:Polarity) -> &'static str {
	match p {
		Polarity::Normal   => "NORM",
		Polarity::Inverted => "INV",
	}
}

impl VendorDialect for DG1000Z {

	fn vendor(&self) -> Vendor { Vendor::Rigol }

	fn infinite_load_token(&self) -> &'static str { INFINITE_LOAD }

	fn format(&self, command:&Command) -> Result<String> {
		let cmd = match *command {
			Command::Amplitude{ channel, amplitude, unit } => format!("SOUR{}:VOLT {}{}", channel, amplitude, unit.token()),
			Command::Frequency{ channel, frequency, unit } => format!("SOUR{}:FREQ {}{}", channel, frequency, unit.token()),
			Command::Offset{ channel, offset }             => format!("SOUR{}:VOLT:OFFS {}", channel, offset),
			Command::Phase{ channel, phase }               => format!("SOUR{}:PHAS {}", channel, phase),
			Command::Waveform{ channel, waveform }         => format!("SOUR{}:FUNC {}", channel, waveform.token()),
			Command::Output{ channel, state }              => format!("OUTP{} {}", channel, on_off(state)),
			Command::OutputLoad{ channel, load }           => match load {
				Load::Ohms(ohms)  => format!("OUTP{}:LOAD {}", channel, ohms),
				Load::Symbolic(_) => format!("OUTP{}:LOAD {}", channel, INFINITE_LOAD),
			},
			Command::Polarity{ channel, polarity }         => format!("OUTP{}:POL {}", channel, polarity_token(polarity)),
			Command::BurstDelay{ channel, delay }          => format!("SOUR{}:BURS:TDEL {}", channel, delay),
			Command::BurstMode{ channel, mode }            => match mode {
				BurstMode::Rigol(m) => format!("SOUR{}:BURS:MODE {}", channel, m.token()),
				BurstMode::Siglent(_) => return Err(Error::InvalidArgumentType{
					argument: "burst_mode",
					expected: "a BurstModeRigol (TRIG, INF, GAT)",
					received: mode.to_string(),
				}),
			},
			Command::BurstPeriod{ channel, period }        => format!("SOUR{}:BURS:INT:PER {}", channel, period),
			Command::BurstState{ channel, state }          => format!("SOUR{}:BURS {}", channel, on_off(state)),
			Command::BurstTriggerSource{ channel, source } => format!("SOUR{}:BURS:TRIG:SOUR {}", channel, source.token()),
			Command::TriggerBurst{ channel }               => format!("SOUR{}:BURS:TRIG", channel),
			Command::SyncPhase{ channel }                  => format!("SOUR{}:PHAS:SYNC", channel),
			Command::BasicWaveQuery{ .. }                  => return Err(self.unsupported(command.name())),
			Command::Identify                              => "*IDN?".to_owned(),
		};
		Ok(cmd)
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::command::Channel;
	use crate::enums::*;

	fn fmt(c:Command) -> String { DG1000Z.render(&c).unwrap() }

	#[test]
	fn units_are_appended_to_the_number() {
		assert_eq!(fmt(Command::Amplitude{ channel: Channel::ONE, amplitude: 2.5, unit: AmplitudeUnit::Vpp }), "SOUR1:VOLT 2.5VPP");
		assert_eq!(fmt(Command::Amplitude{ channel: Channel::TWO, amplitude: -3.0, unit: AmplitudeUnit::Dbm }), "SOUR2:VOLT -3DBM");
		assert_eq!(fmt(Command::Frequency{ channel: Channel::ONE, frequency: 2.0, unit: FrequencyUnit::KHz }), "SOUR1:FREQ 2KHZ");
		assert_eq!(fmt(Command::Frequency{ channel: Channel::TWO, frequency: 1.25, unit: FrequencyUnit::MHz }), "SOUR2:FREQ 1.25MHZ");
	}

	#[test]
	fn output_and_burst_commands() {
		let ch = Channel::TWO;
		assert_eq!(fmt(Command::Output{ channel: ch, state: true }), "OUTP2 ON");
		assert_eq!(fmt(Command::OutputLoad{ channel: ch, load: Load::Ohms(50.0) }), "OUTP2:LOAD 50");
		assert_eq!(fmt(Command::OutputLoad{ channel: ch, load: OutputLoad::HighZ.into() }), "OUTP2:LOAD INF");
		assert_eq!(fmt(Command::Polarity{ channel: ch, polarity: Polarity::Inverted }), "OUTP2:POL INV");
		assert_eq!(fmt(Command::BurstMode{ channel: ch, mode: BurstModeRigol::Gated.into() }), "SOUR2:BURS:MODE GAT");
		assert_eq!(fmt(Command::BurstTriggerSource{ channel: ch, source: BurstTriggerSource::Manual }), "SOUR2:BURS:TRIG:SOUR MAN");
		assert_eq!(fmt(Command::BurstPeriod{ channel: ch, period: 0.01 }), "SOUR2:BURS:INT:PER 0.01");
		assert_eq!(fmt(Command::BurstDelay{ channel: ch, delay: 0.000001 }), "SOUR2:BURS:TDEL 0.000001");
		assert_eq!(fmt(Command::TriggerBurst{ channel: ch }), "SOUR2:BURS:TRIG");
		assert_eq!(fmt(Command::SyncPhase{ channel: ch }), "SOUR2:PHAS:SYNC");
	}

	#[test]
	fn siglent_burst_mode_is_rejected() {
		let c = Command::BurstMode{ channel: Channel::ONE, mode: BurstModeSiglent::Ncyc.into() };
		assert!(matches!(DG1000Z.render(&c), Err(Error::InvalidArgumentType{ argument: "burst_mode", .. })));
	}

	#[test]
	fn basic_wave_query_is_siglent_only() {
		let c = Command::BasicWaveQuery{ channel: Channel::ONE };
		assert!(matches!(DG1000Z.render(&c), Err(Error::Unsupported{ vendor: Vendor::Rigol, .. })));
		assert!(DG1000Z.parse_basic_wave("C1:BSWV WVTP,SINE").is_err());
	}
}
