// Where the facade reports what it sent and what went wrong.

use std::io;

use crate::command::Channel;
use crate::devices::Vendor;

pub trait Observer {
	fn command_sent(&self, vendor:Vendor, channel:Option<Channel>, command:&str);

	fn response_received(&self, vendor:Vendor, command:&str, response:&str) {
		let _ = (vendor, command, response);
	}

	fn transport_failed(&self, vendor:Vendor, command:&str, error:&io::Error);
}

/// Forwards everything to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl Observer for LogObserver {

	fn command_sent(&self, vendor:Vendor, channel:Option<Channel>, command:&str) {
		match channel {
			Some(ch) => log::trace!("{} channel {}: sent {:?}", vendor, ch, command),
			None     => log::trace!("{}: sent {:?}", vendor, command),
		}
	}

	fn response_received(&self, vendor:Vendor, command:&str, response:&str) {
		log::trace!("{}: {:?} answered {:?}", vendor, command, response);
	}

	fn transport_failed(&self, vendor:Vendor, command:&str, error:&io::Error) {
		log::error!("{}: failed to send {:?}: {}", vendor, command, error);
	}

}
