#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Error, ErrorKind};
use std::rc::Rc;

use awg::{Channel, Observer, Transport, Vendor};

// Records every command and answers queries from a script
#[derive(Default)]
pub struct MockTransport {
	pub sent: Vec<String>,
	pub responses: VecDeque<String>,
	pub fail_with: Option<ErrorKind>,
}

impl MockTransport {
	pub fn new() -> Self { Self::default() }

	pub fn answering(responses:&[&str]) -> Self {
		MockTransport{ responses: responses.iter().map(|s| s.to_string()).collect(), ..Self::default() }
	}

	pub fn failing(kind:ErrorKind) -> Self {
		MockTransport{ fail_with: Some(kind), ..Self::default() }
	}

	fn check(&self) -> io::Result<()> {
		match self.fail_with {
			Some(kind) => Err(Error::new(kind, "mock transport failure")),
			None       => Ok(()),
		}
	}
}

impl Transport for MockTransport {
	fn write(&mut self, command:&str) -> io::Result<()> {
		self.check()?;
		self.sent.push(command.to_owned());
		Ok(())
	}

	fn query(&mut self, command:&str) -> io::Result<String> {
		self.check()?;
		self.sent.push(command.to_owned());
		self.responses.pop_front().ok_or_else(|| Error::new(ErrorKind::TimedOut, "no scripted response"))
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	Sent(Option<u8>, String),
	Answered(String, String),
	Failed(String),
}

#[derive(Clone, Default)]
pub struct RecordingObserver {
	pub events: Rc<RefCell<Vec<Event>>>,
}

impl Observer for RecordingObserver {
	fn command_sent(&self, _vendor:Vendor, channel:Option<Channel>, command:&str) {
		self.events.borrow_mut().push(Event::Sent(channel.map(Channel::number), command.to_owned()));
	}

	fn response_received(&self, _vendor:Vendor, command:&str, response:&str) {
		self.events.borrow_mut().push(Event::Answered(command.to_owned(), response.to_owned()));
	}

	fn transport_failed(&self, _vendor:Vendor, command:&str, _error:&io::Error) {
		self.events.borrow_mut().push(Event::Failed(command.to_owned()));
	}
}
