
// Configures a short sine burst on one channel and fires it manually.
//
// Usage: burst_sequence <config.json> [channel]
// Set RUST_LOG=trace to see every command sent.

use std::env;
use std::process;

use awg::{Awg, AwgConfig, BurstModeRigol, BurstModeSiglent, BurstTriggerSource, FrequencyUnit, AmplitudeUnit, Vendor, WaveformType, WaveParameter};

fn run(config_path:&str, channel:u8) -> awg::Result<()> {
	let config = AwgConfig::load(config_path)?;
	let mut dev = Awg::connect(&config)?;

	let idn = dev.identify()?;
	log::info!("connected to {} {} (fw {})", idn.manufacturer, idn.model, idn.fw_version);

	dev.set_output(channel, false)?;
	dev.set_waveform(channel, WaveformType::Sine)?;
	dev.set_frequency(channel, 10, FrequencyUnit::KHz)?;
	dev.set_amplitude(channel, 2.0, AmplitudeUnit::Vpp)?;
	dev.set_offset(channel, 0.0)?;
	dev.set_phase(channel, 0.0)?;

	match config.vendor {
		Vendor::Rigol   => dev.set_burst_mode(channel, BurstModeRigol::Triggered)?,
		Vendor::Siglent => dev.set_burst_mode(channel, BurstModeSiglent::Ncyc)?,
	}
	dev.set_burst_trigger_source(channel, BurstTriggerSource::Manual)?;
	dev.set_burst_delay(channel, 0.0)?;
	dev.set_burst_state(channel, true)?;
	dev.set_output(channel, true)?;
	dev.trigger_burst(channel)?;

	if config.vendor == Vendor::Siglent {
		let freq = dev.get_channel_wave_parameter(channel, WaveParameter::Frequency)?;
		log::info!("channel {} frequency read back as {}", channel, freq);
	}

	Ok(())
}

fn main() {
	env_logger::init();

	let args:Vec<String> = env::args().collect();
	if args.len() < 2 {
		eprintln!("usage: {} <config.json> [channel]", args[0]);
		process::exit(2);
	}

	let channel:u8 = match args.get(2).map(|s| s.parse::<u8>()) {
		None         => 1,
		Some(Ok(ch)) => ch,
		Some(Err(_)) => {
			eprintln!("channel must be a number");
			process::exit(2);
		},
	};

	if let Err(e) = run(&args[1], channel) {
		log::error!("{}", e);
		process::exit(1);
	}
}
