//! The instrument facade.
//!
//! [`Awg`] owns a [`Transport`] and the vendor's [`VendorDialect`]. Every operation runs the
//! same steps: check the channel, build a [`Command`], let the dialect validate and format
//! it, then write it (or query with it) exactly once.
//!
//! Transport failures are reported to the observer and then returned to the caller, for
//! every operation alike.
//!
//! ```no_run
//! use awg::{Awg, BurstModeSiglent, BurstTriggerSource, FrequencyUnit, Vxi11Transport};
//!
//! # fn main() -> awg::Result<()> {
//! let transport = Vxi11Transport::connect("192.168.1.50", None)?;
//! let mut sdg = Awg::siglent(transport);
//! sdg.set_frequency(1, 2, FrequencyUnit::KHz)?;      // C1:BSWV FRQ,2000
//! sdg.set_burst_mode(1, BurstModeSiglent::Ncyc)?;
//! sdg.set_burst_trigger_source(1, BurstTriggerSource::Manual)?;
//! sdg.set_burst_state(1, true)?;
//! sdg.trigger_burst(1)?;
//! # Ok(())
//! # }
//! ```

use crate::command::{Channel, Command};
use crate::config::{AwgConfig, TransportConfig};
use crate::devices::{BasicWave, Vendor, VendorDialect, WaveParameter};
use crate::enums::{AmplitudeUnit, BurstMode, BurstTriggerSource, FrequencyUnit, Load, Polarity, WaveformType};
use crate::error::{Error, Result};
use crate::identity::Identity;
use crate::observer::{LogObserver, Observer};
use crate::transport::{SocketTransport, Transport, Vxi11Transport};

pub struct Awg<T: Transport> {
	transport: T,
	dialect: &'static dyn VendorDialect,
	observer: Box<dyn Observer>,
}

impl Awg<Box<dyn Transport>> {

	/// Opens the transport described by `config`, checking the model if one is expected.
	pub fn connect(config:&AwgConfig) -> Result<Self> {
		let timeout = config.io_timeout();
		let transport:Box<dyn Transport> = match config.transport {
			TransportConfig::Vxi11{ core_port: None }       => Box::new(Vxi11Transport::connect(&config.address, timeout)?),
			TransportConfig::Vxi11{ core_port: Some(port) } => Box::new(Vxi11Transport::connect_port(&config.address, port, timeout)?),
			TransportConfig::Socket{ port }                  => Box::new(SocketTransport::connect((config.address.as_str(), port), timeout)?),
		};
		log::debug!("connected to {} instrument at {} ({:?})", config.vendor, config.address, config.transport);

		let mut awg = Awg::new(transport, config.vendor);
		if let Some(expected) = &config.expect_model {
			let idn = awg.identify()?;
			if !idn.is_model(expected) {
				return Err(Error::UnexpectedInstrument{ expected: expected.clone(), found: idn.model });
			}
		}
		Ok(awg)
	}

}

impl<T: Transport> Awg<T> {

	pub fn new(transport:T, vendor:Vendor) -> Self {
		Awg{ transport, dialect: vendor.dialect(), observer: Box::new(LogObserver) }
	}

	/// Rigol DG1000Z series.
	pub fn rigol(transport:T) -> Self { Self::new(transport, Vendor::Rigol) }

	/// Siglent SDG1000X series.
	pub fn siglent(transport:T) -> Self { Self::new(transport, Vendor::Siglent) }

	/// Replaces the default [`LogObserver`].
	pub fn with_observer<O: Observer + 'static>(mut self, observer:O) -> Self {
		self.observer = Box::new(observer);
		self
	}

	pub fn vendor(&self) -> Vendor { self.dialect.vendor() }

	pub fn transport(&self) -> &T { &self.transport }

	pub fn transport_mut(&mut self) -> &mut T { &mut self.transport }

	pub fn into_transport(self) -> T { self.transport }

	/// Validates, formats and writes one command.
	pub fn execute(&mut self, command:Command) -> Result<()> {
		let text = self.dialect.render(&command)?;
		let vendor = self.vendor();

		match self.transport.write(&text) {
			Ok(()) => {
				self.observer.command_sent(vendor, command.channel(), &text);
				Ok(())
			},
			Err(e) => {
				self.observer.transport_failed(vendor, &text, &e);
				Err(Error::Transport(e))
			},
		}
	}

	/// Validates, formats and sends one query, returning the raw answer.
	pub fn ask(&mut self, command:Command) -> Result<String> {
		let text = self.dialect.render(&command)?;
		let vendor = self.vendor();

		match self.transport.query(&text) {
			Ok(response) => {
				self.observer.command_sent(vendor, command.channel(), &text);
				self.observer.response_received(vendor, &text, &response);
				Ok(response)
			},
			Err(e) => {
				self.observer.transport_failed(vendor, &text, &e);
				Err(Error::Transport(e))
			},
		}
	}

	pub fn set_amplitude(&mut self, channel:u8, amplitude:impl Into<f64>, unit:AmplitudeUnit) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Amplitude{ channel, amplitude: amplitude.into(), unit })
	}

	pub fn set_frequency(&mut self, channel:u8, frequency:impl Into<f64>, unit:FrequencyUnit) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Frequency{ channel, frequency: frequency.into(), unit })
	}

	pub fn set_offset(&mut self, channel:u8, offset_voltage:impl Into<f64>) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Offset{ channel, offset: offset_voltage.into() })
	}

	/// Phase in degrees, magnitude at most 360.
	pub fn set_phase(&mut self, channel:u8, phase:impl Into<f64>) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Phase{ channel, phase: phase.into() })
	}

	pub fn set_waveform(&mut self, channel:u8, waveform:WaveformType) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Waveform{ channel, waveform })
	}

	pub fn set_output(&mut self, channel:u8, state:bool) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Output{ channel, state })
	}

	/// Resistance in ohms, or [`OutputLoad`](crate::OutputLoad) for high impedance.
	pub fn set_output_load(&mut self, channel:u8, load:impl Into<Load>) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::OutputLoad{ channel, load: load.into() })
	}

	pub fn set_polarity(&mut self, channel:u8, polarity:Polarity) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::Polarity{ channel, polarity })
	}

	/// Delay in seconds between trigger and burst.
	pub fn set_burst_delay(&mut self, channel:u8, delay:impl Into<f64>) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::BurstDelay{ channel, delay: delay.into() })
	}

	/// Takes the burst mode enum of this instrument's vendor; the other vendor's is rejected.
	pub fn set_burst_mode(&mut self, channel:u8, mode:impl Into<BurstMode>) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::BurstMode{ channel, mode: mode.into() })
	}

	/// Internal burst period in seconds.
	pub fn set_burst_period(&mut self, channel:u8, period:impl Into<f64>) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::BurstPeriod{ channel, period: period.into() })
	}

	pub fn set_burst_state(&mut self, channel:u8, state:bool) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::BurstState{ channel, state })
	}

	pub fn set_burst_trigger_source(&mut self, channel:u8, source:BurstTriggerSource) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::BurstTriggerSource{ channel, source })
	}

	pub fn trigger_burst(&mut self, channel:u8) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::TriggerBurst{ channel })
	}

	/// Aligns the phases of both outputs. Siglent instruments always act on both channels,
	/// but the channel must still be 1 or 2.
	pub fn sync_phase(&mut self, channel:u8) -> Result<()> {
		let channel = Channel::new(channel)?;
		self.execute(Command::SyncPhase{ channel })
	}

	/// All basic-wave parameters of a channel. Siglent only.
	pub fn basic_wave(&mut self, channel:u8) -> Result<BasicWave> {
		let channel = Channel::new(channel)?;
		let response = self.ask(Command::BasicWaveQuery{ channel })?;
		self.dialect.parse_basic_wave(&response)
	}

	/// Raw value of one basic-wave parameter, units included. Siglent only.
	pub fn get_channel_wave_parameter(&mut self, channel:u8, parameter:WaveParameter) -> Result<String> {
		let wave = self.basic_wave(channel)?;
		let value = wave.get(parameter)?;
		Ok(value.to_owned())
	}

	pub fn identify(&mut self) -> Result<Identity> {
		let response = self.ask(Command::Identify)?;
		Identity::parse(&response)
	}

}
