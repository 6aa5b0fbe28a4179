
// Siglent SDG1000X: parameters grouped per channel (`C<n>:BSWV KEY,value`), quantities in base units.

use crate::command::Command;
use crate::enums::{BurstMode, Load, Polarity};
use crate::error::{Error, Result};

use super::{on_off, BasicWave, Vendor, VendorDialect};

pub const INFINITE_LOAD:&str = "HZ";

pub struct SDG1000X;

fn polarity_token(p:Polarity) -> &'static str {
	match p {
		Polarity::Normal   => "NOR",
		Polarity::Inverted => "INVT",
	}
}

impl VendorDialect for SDG1000X {

	fn vendor(&self) -> Vendor { Vendor::Siglent }

	fn infinite_load_token(&self) -> &'static str { INFINITE_LOAD }

	fn format(&self, command:&Command) -> Result<String> {
		let cmd = match *command {
			// AMP whatever the unit
			Command::Amplitude{ channel, amplitude, .. }   => format!("C{}:BSWV AMP,{}", channel, amplitude),
			Command::Frequency{ channel, frequency, unit } => format!("C{}:BSWV FRQ,{}", channel, unit.to_hz(frequency)),
			Command::Offset{ channel, offset }             => format!("C{}:BSWV OFST,{}", channel, offset),
			Command::Phase{ channel, phase }               => format!("C{}:BSWV PHSE,{}", channel, phase),
			Command::Waveform{ channel, waveform }         => format!("C{}:BSWV WVTP,{}", channel, waveform.token()),
			Command::Output{ channel, state }              => format!("C{}:OUTP {}", channel, on_off(state)),
			Command::OutputLoad{ channel, load }           => match load {
				Load::Ohms(ohms)  => format!("C{}:OUTP LOAD,{}", channel, ohms),
				Load::Symbolic(_) => format!("C{}:OUTP LOAD,{}", channel, INFINITE_LOAD),
			},
			Command::Polarity{ channel, polarity }         => format!("C{}:OUTP PLRT,{}", channel, polarity_token(polarity)),
			Command::BurstDelay{ channel, delay }          => format!("C{}:BTWV DEL,{}", channel, delay),
			Command::BurstMode{ channel, mode }            => match mode {
				BurstMode::Siglent(m) => format!("C{}:BTWV GATE_NCYC,{}", channel, m.token()),
				BurstMode::Rigol(_) => return Err(Error::InvalidArgumentType{
					argument: "burst_mode",
					expected: "a BurstModeSiglent (NCYC, GATE)",
					received: mode.to_string(),
				}),
			},
			Command::BurstPeriod{ channel, period }        => format!("C{}:BTWV PRD,{}", channel, period),
			Command::BurstState{ channel, state }          => format!("C{}:BTWV STATE,{}", channel, on_off(state)),
			Command::BurstTriggerSource{ channel, source } => format!("C{}:BTWV TRSR,{}", channel, source.token()),
			Command::TriggerBurst{ channel }               => format!("C{}:BTWV MTRIG", channel),
			// Acts on both channels at once; the channel only had to be valid
			Command::SyncPhase{ .. }                       => "EQPHASE".to_owned(),
			Command::BasicWaveQuery{ channel }             => format!("C{}:BSWV?", channel),
			Command::Identify                              => "*IDN?".to_owned(),
		};
		Ok(cmd)
	}

	fn parse_basic_wave(&self, response:&str) -> Result<BasicWave> {
		BasicWave::parse(response)
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::command::Channel;
	use crate::enums::*;

	fn fmt(c:Command) -> String { SDG1000X.render(&c).unwrap() }

	#[test]
	fn frequency_is_sent_in_hz() {
		let ch = Channel::ONE;
		assert_eq!(fmt(Command::Frequency{ channel: ch, frequency: 2.0, unit: FrequencyUnit::KHz }), "C1:BSWV FRQ,2000");
		assert_eq!(fmt(Command::Frequency{ channel: ch, frequency: 1.5, unit: FrequencyUnit::MHz }), "C1:BSWV FRQ,1500000");
		assert_eq!(fmt(Command::Frequency{ channel: ch, frequency: 440.0, unit: FrequencyUnit::Hz }), "C1:BSWV FRQ,440");
	}

	#[test]
	fn amplitude_key_ignores_the_unit() {
		let ch = Channel::ONE;
		assert_eq!(fmt(Command::Amplitude{ channel: ch, amplitude: 2.5, unit: AmplitudeUnit::Vpp }), "C1:BSWV AMP,2.5");
		assert_eq!(fmt(Command::Amplitude{ channel: ch, amplitude: 1.0, unit: AmplitudeUnit::Vrms }), "C1:BSWV AMP,1");
		assert_eq!(fmt(Command::Amplitude{ channel: ch, amplitude: -3.0, unit: AmplitudeUnit::Dbm }), "C1:BSWV AMP,-3");
	}

	#[test]
	fn grouped_parameters() {
		let ch = Channel::TWO;
		assert_eq!(fmt(Command::Waveform{ channel: ch, waveform: WaveformType::Pulse }), "C2:BSWV WVTP,PULS");
		assert_eq!(fmt(Command::Offset{ channel: ch, offset: -0.25 }), "C2:BSWV OFST,-0.25");
		assert_eq!(fmt(Command::Phase{ channel: ch, phase: 180.0 }), "C2:BSWV PHSE,180");
		assert_eq!(fmt(Command::Output{ channel: ch, state: false }), "C2:OUTP OFF");
		assert_eq!(fmt(Command::OutputLoad{ channel: ch, load: OutputLoad::Infinite.into() }), "C2:OUTP LOAD,HZ");
		assert_eq!(fmt(Command::OutputLoad{ channel: ch, load: 50u32.into() }), "C2:OUTP LOAD,50");
		assert_eq!(fmt(Command::Polarity{ channel: ch, polarity: Polarity::Normal }), "C2:OUTP PLRT,NOR");
		assert_eq!(fmt(Command::BurstState{ channel: ch, state: true }), "C2:BTWV STATE,ON");
		assert_eq!(fmt(Command::BurstMode{ channel: ch, mode: BurstModeSiglent::Gate.into() }), "C2:BTWV GATE_NCYC,GATE");
		assert_eq!(fmt(Command::BurstTriggerSource{ channel: ch, source: BurstTriggerSource::External }), "C2:BTWV TRSR,EXT");
		assert_eq!(fmt(Command::TriggerBurst{ channel: ch }), "C2:BTWV MTRIG");
		assert_eq!(fmt(Command::BasicWaveQuery{ channel: ch }), "C2:BSWV?");
	}

	#[test]
	fn phase_sync_ignores_the_channel() {
		assert_eq!(fmt(Command::SyncPhase{ channel: Channel::ONE }), "EQPHASE");
		assert_eq!(fmt(Command::SyncPhase{ channel: Channel::TWO }), "EQPHASE");
	}

	#[test]
	fn rigol_burst_mode_is_rejected() {
		let c = Command::BurstMode{ channel: Channel::ONE, mode: BurstModeRigol::Triggered.into() };
		match SDG1000X.render(&c) {
			Err(Error::InvalidArgumentType{ expected, .. }) => assert!(expected.contains("BurstModeSiglent")),
			other => panic!("unexpected {:?}", other),
		}
	}

	#[test]
	fn waveform_and_burst_delay_keywords() {
		let ch = Channel::ONE;
		let sent:Vec<String> = WaveformType::ALL.iter()
			.map(|w| fmt(Command::Waveform{ channel: ch, waveform: *w }))
			.collect();
		assert_eq!(sent, vec![
			"C1:BSWV WVTP,SIN", "C1:BSWV WVTP,SQU", "C1:BSWV WVTP,RAMP", "C1:BSWV WVTP,PULS",
			"C1:BSWV WVTP,NOIS", "C1:BSWV WVTP,DC", "C1:BSWV WVTP,ARB",
		]);
		assert_eq!(fmt(Command::BurstDelay{ channel: ch, delay: 0.5 }), "C1:BTWV DEL,0.5");
	}
}
