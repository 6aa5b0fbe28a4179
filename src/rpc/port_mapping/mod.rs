
pub const PMAP_PROG:u32 = 100000;
pub const PMAP_VERS:u32 = 2;
pub const PMAP_PORT:u16 = 111;

pub const PMAPPROC_GETPORT:u32 = 3;     // (mapping) -> unsigned int

use std::io::{self, Error, ErrorKind};
use std::time::Duration;

use super::IPPROTO_TCP;
use super::xdr_pack;
use super::tcp_clients::TcpClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
	Tcp,
}

impl Protocol {
	pub fn to_u32(self) -> u32 { match self {
		Protocol::Tcp => IPPROTO_TCP,
	}}
}

#[derive(Debug, Clone, Copy)]
pub struct Mapping {
	pub program: u32,
	pub version: u32,
	pub protocol: Protocol,
	pub port: u32,		// XDR encodes it as a u32 even though only 16 bits are meaningful
}

pub struct TcpPortMapperClient {
	pub host: String,
	client: TcpClient,
}

impl TcpPortMapperClient {

	pub fn new(host:&str, timeout:Option<Duration>) -> io::Result<Self> {
		Self::with_port(host, PMAP_PORT, timeout)
	}

	pub fn with_port(host:&str, port:u16, timeout:Option<Duration>) -> io::Result<Self> {
		let client = TcpClient::connect((host, port), PMAP_PROG, PMAP_VERS, timeout)?;
		Ok(Self{ host: host.to_owned(), client })
	}

	pub fn get_port(&mut self, m:&Mapping) -> io::Result<u16> {
		self.client.start_call(PMAPPROC_GETPORT)?;
		xdr_pack::pack_mapping(&mut self.client.packer, m.program, m.version, m.protocol.to_u32(), m.port)?;
		self.client.do_call()?;

		let ans:u32 = self.client.unpacker.unpack_u32()?;

		if !self.client.unpacker.all_data_consumed() {
			return Err(Error::new(ErrorKind::InvalidData, "Data unexpectedly left over after unpacking port"));
		}

		match ans {
			0 => Err(Error::new(ErrorKind::NotFound, format!("Program {:#x} v{} is not registered on {}", m.program, m.version, self.host))),
			p if p > u16::MAX as u32 => Err(Error::new(ErrorKind::InvalidData, "Port mapper returned a port above 65535")),
			p => Ok(p as u16),
		}
	}

}
