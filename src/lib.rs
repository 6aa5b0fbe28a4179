
// External data representation, a protocol for serializing data to be sent over the network
pub mod xdr;

// Remote procedure call, a protocol build on top of XDR to provide something like C-style function calls over the network
pub mod rpc;

// A protocol using RPC that's meant to communicate with instruments like oscilloscopes, power supplies, waveform generators, etc
pub mod vxi11;

// Line-oriented command transports (VXI-11 and raw SCPI sockets)
pub mod transport;

pub mod error;
pub mod enums;
pub mod command;
pub mod identity;
pub mod observer;
pub mod config;

// Per-vendor command dialects
pub mod devices;

// The waveform generator facade
pub mod awg;

pub use crate::awg::Awg;
pub use crate::command::{Channel, Command};
pub use crate::config::{AwgConfig, TransportConfig};
pub use crate::devices::{BasicWave, Vendor, VendorDialect, WaveParameter};
pub use crate::enums::{AmplitudeUnit, BurstMode, BurstModeRigol, BurstModeSiglent, BurstTriggerSource, FrequencyUnit, Load, OutputLoad, Polarity, WaveformType};
pub use crate::error::{Error, Result};
pub use crate::identity::Identity;
pub use crate::observer::{LogObserver, Observer};
pub use crate::transport::{SocketTransport, Transport, Vxi11Transport};
