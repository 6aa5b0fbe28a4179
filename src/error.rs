//! Error type for everything above the wire protocol layers.
//!
//! Validation failures (`InvalidChannel`, `InvalidArgumentType`, `OutOfRange`) are always
//! returned before a single byte reaches the instrument. The XDR, RPC and VXI-11 layers
//! report `std::io::Error`, which converts into [`Error::Transport`] with `?`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::devices::Vendor;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid channel {0}; these instruments only have channels 1 and 2")]
    InvalidChannel(u8),

    /// A value that is not a member of the domain the argument requires, e.g. a burst mode
    /// belonging to the other vendor, a non-finite number or an unknown token.
    #[error("'{argument}' must be {expected}; received {received}")]
    InvalidArgumentType {
        argument: &'static str,
        expected: &'static str,
        received: String,
    },

    #[error("'{argument}' {constraint}; received {value}")]
    OutOfRange {
        argument: &'static str,
        value: f64,
        constraint: &'static str,
    },

    #[error("transport failure: {0}")]
    Transport(#[from] io::Error),

    #[error("malformed response from instrument: {0:?}")]
    MalformedResponse(String),

    #[error("parameter {0} is not present in the instrument's response")]
    MissingParameter(&'static str),

    #[error("{operation} is not supported on {vendor} instruments")]
    Unsupported {
        operation: &'static str,
        vendor: Vendor,
    },

    #[error("connected to {found:?}, which is not a {expected}")]
    UnexpectedInstrument { expected: String, found: String },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("unable to read configuration file {}: {source}", .path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
