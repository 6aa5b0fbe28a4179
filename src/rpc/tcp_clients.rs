use std::io::{self, Read, Write, Error, ErrorKind};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use byteorder::{BigEndian, WriteBytesExt, ReadBytesExt};

use crate::xdr;
use super::{xdr_pack, xdr_unpack, LAST_FRAGMENT};

// Guards against a corrupt fragment header making us allocate gigabytes
const MAX_FRAGMENT_LEN:usize = 16 * 1024 * 1024;

pub struct TcpClient {
	stream: TcpStream,
	pub prog: u32,
	pub vers: u32,
	pub lastxid: u32,
	pub packer: xdr::Packer,
	pub unpacker: xdr::Unpacker,
}

impl TcpClient {

	pub fn connect<A: ToSocketAddrs>(addr: A, prog: u32, vers: u32, timeout: Option<Duration>) -> io::Result<Self> {
		let stream = TcpStream::connect(addr)?;
		stream.set_read_timeout(timeout)?;
		stream.set_write_timeout(timeout)?;
		stream.set_nodelay(true)?;
		Ok(Self{ stream, prog, vers, lastxid: 0, packer: xdr::Packer::new(), unpacker: xdr::Unpacker::new() })
	}

	// Bumps the xid and leaves a call header in the packer, ready for the procedure arguments
	pub fn start_call(&mut self, prc:u32) -> io::Result<()> {
		self.lastxid = self.lastxid.wrapping_add(1);
		self.packer.reset();
		xdr_pack::pack_callheader_no_auth(&mut self.packer, self.lastxid, self.prog, self.vers, prc)
	}

	// Sends whatever is in the packer as one record and leaves the reply body in the unpacker
	pub fn do_call(&mut self) -> io::Result<()> {
		let call:&[u8] = self.packer.as_bytes();
		let mut send_bytes:Vec<u8> = Vec::with_capacity(call.len() + 4);
		send_bytes.write_u32::<BigEndian>(call.len() as u32 | LAST_FRAGMENT)?;
		send_bytes.extend_from_slice(call);
		self.stream.write_all(&send_bytes)?;

		loop {
			let reply = read_record(&mut self.stream)?;
			self.unpacker.reset(&reply);

			let xid = xdr_unpack::unpack_replyheader(&mut self.unpacker)?;
			if xid == self.lastxid {
				return Ok(());
			} else if xid < self.lastxid {
				// Stale reply to an earlier call that timed out on our side
				log::debug!("discarding stale RPC reply xid={} (expecting {})", xid, self.lastxid);
				continue;
			} else {
				return Err(Error::new(ErrorKind::InvalidData, "Got a reply to a call we haven't made yet"));
			}
		}
	}

}

// Reads fragments until the one flagged as last and returns the reassembled record
pub fn read_record<R: Read>(rdr:&mut R) -> io::Result<Vec<u8>> {
	let mut record:Vec<u8> = vec![];

	loop {
		let header:u32 = rdr.read_u32::<BigEndian>()?;
		let n = (header & !LAST_FRAGMENT) as usize;

		if record.len() + n > MAX_FRAGMENT_LEN {
			return Err(Error::new(ErrorKind::InvalidData, "RPC record exceeds maximum size"));
		}

		let start = record.len();
		record.resize(start + n, 0);
		rdr.read_exact(&mut record[start..])?;

		if header & LAST_FRAGMENT != 0 { return Ok(record); }
	}
}

// Frames one complete record as a single last fragment
pub fn write_record<W: Write>(wtr:&mut W, record:&[u8]) -> io::Result<()> {
	wtr.write_u32::<BigEndian>(record.len() as u32 | LAST_FRAGMENT)?;
	wtr.write_all(record)?;
	wtr.flush()
}
