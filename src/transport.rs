//! Text transports to an instrument.
//!
//! [`Transport`] is the seam between the instrument facade and the network: the facade
//! only ever writes a command line or asks a question and waits for one answer.
//!
//! Two implementations are provided:
//!
//! - [`Vxi11Transport`]: VXI-11 over ONC RPC, which is what a VISA `TCPIP::<ip>::INSTR`
//!   resource speaks. Both vendors' LAN interfaces support it.
//! - [`SocketTransport`]: newline-terminated SCPI over a plain TCP socket
//!   (port 5555 on Rigol, 5025 on Siglent).

use std::io::{self, BufRead, BufReader, Error, ErrorKind, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::vxi11::{CoreClient, DEFAULT_DEVICE_NAME};

/// Blocking, one-at-a-time command transport.
pub trait Transport {
	/// Sends one command. No response is expected.
	fn write(&mut self, command:&str) -> io::Result<()>;

	/// Sends one command and returns the instrument's answer with the line terminator removed.
	fn query(&mut self, command:&str) -> io::Result<String>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
	fn write(&mut self, command:&str) -> io::Result<()> { (**self).write(command) }
	fn query(&mut self, command:&str) -> io::Result<String> { (**self).query(command) }
}

fn to_utf8(bytes:Vec<u8>) -> io::Result<String> {
	String::from_utf8(bytes).map_err(|_| Error::new(ErrorKind::InvalidData, "Unable to parse response as UTF-8"))
}

fn strip_terminator(mut s:String) -> String {
	while s.ends_with('\n') || s.ends_with('\r') { s.pop(); }
	s
}

pub struct Vxi11Transport {
	core: CoreClient,
}

impl Vxi11Transport {

	/// Locates the core channel through the host's port mapper and opens a link to `inst0`.
	pub fn connect(host:&str, timeout:Option<Duration>) -> io::Result<Self> {
		Self::from_core(CoreClient::new(host, timeout)?)
	}

	/// Connects straight to a known core channel port.
	pub fn connect_port(host:&str, port:u16, timeout:Option<Duration>) -> io::Result<Self> {
		Self::from_core(CoreClient::with_port(host, port, timeout)?)
	}

	fn from_core(mut core:CoreClient) -> io::Result<Self> {
		core.create_link(DEFAULT_DEVICE_NAME)?;
		Ok(Self{ core })
	}

}

impl Transport for Vxi11Transport {

	fn write(&mut self, command:&str) -> io::Result<()> {
		self.core.write(command.as_bytes())
	}

	fn query(&mut self, command:&str) -> io::Result<String> {
		let bytes = self.core.ask(command.as_bytes())?;
		Ok(strip_terminator(to_utf8(bytes)?))
	}

}

impl Drop for Vxi11Transport {

	fn drop(&mut self) {
		if let Err(e) = self.core.destroy_link() {
			log::warn!("unable to destroy VXI-11 link: {}", e);
		}
	}

}

pub struct SocketTransport {
	reader: BufReader<TcpStream>,
	stream: TcpStream,
}

impl SocketTransport {

	pub fn connect<A: ToSocketAddrs>(addr:A, timeout:Option<Duration>) -> io::Result<Self> {
		let stream = TcpStream::connect(addr)?;
		stream.set_read_timeout(timeout)?;
		stream.set_write_timeout(timeout)?;
		stream.set_nodelay(true)?;
		let reader = BufReader::new(stream.try_clone()?);
		Ok(Self{ reader, stream })
	}

}

impl Transport for SocketTransport {

	fn write(&mut self, command:&str) -> io::Result<()> {
		let mut line = String::with_capacity(command.len() + 1);
		line.push_str(command);
		line.push('\n');
		self.stream.write_all(line.as_bytes())?;
		self.stream.flush()
	}

	fn query(&mut self, command:&str) -> io::Result<String> {
		self.write(command)?;

		let mut line:Vec<u8> = vec![];
		if self.reader.read_until(b'\n', &mut line)? == 0 {
			return Err(Error::new(ErrorKind::UnexpectedEof, "Instrument closed the connection before answering"));
		}
		Ok(strip_terminator(to_utf8(line)?))
	}

}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Read;
	use std::net::TcpListener;
	use std::thread;

	#[test]
	fn terminators_are_stripped() {
		assert_eq!(strip_terminator("1\r\n".to_owned()), "1");
		assert_eq!(strip_terminator("a,b".to_owned()), "a,b");
	}

	#[test]
	fn socket_transport_writes_lines_and_reads_answers() {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();

		let server = thread::spawn(move || {
			let (mut stream, _) = listener.accept().unwrap();
			let mut reader = BufReader::new(stream.try_clone().unwrap());

			let mut first = String::new();
			reader.read_line(&mut first).unwrap();
			let mut second = String::new();
			reader.read_line(&mut second).unwrap();
			stream.write_all(b"Siglent Technologies,SDG1032X,SDG1XCAX1R0000,1.01.01.33R1\n").unwrap();

			let mut rest = vec![];
			reader.read_to_end(&mut rest).unwrap();
			(first, second)
		});

		{
			let mut t = SocketTransport::connect(addr, Some(Duration::from_secs(5))).unwrap();
			t.write("C1:OUTP ON").unwrap();
			let idn = t.query("*IDN?").unwrap();
			assert!(idn.starts_with("Siglent Technologies,SDG1032X"));
		}

		let (first, second) = server.join().unwrap();
		assert_eq!(first, "C1:OUTP ON\n");
		assert_eq!(second, "*IDN?\n");
	}
}
