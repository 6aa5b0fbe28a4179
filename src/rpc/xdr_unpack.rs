use std::io::{self, Error, ErrorKind};

use crate::xdr::Unpacker;
use crate::rpc::{CALL, REPLY, RPCVERSION, MSG_DENIED, RPC_MISMATCH, AUTH_ERROR, MSG_ACCEPTED, PROG_UNAVAIL, PROG_MISMATCH, PROC_UNAVAIL, GARBAGE_ARGS, SYSTEM_ERR, SUCCESS};

fn err(msg:&str) -> io::Error { Error::new(ErrorKind::Other, msg) }

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallHeader {
	pub xid: u32,
	pub prog: u32,
	pub vers: u32,
	pub prc: u32,
}

pub fn unpack_auth(unpacker:&mut Unpacker) -> io::Result<(i32, Vec<u8>)> {
	let flavor:i32   = unpacker.unpack_enum()?;
	let body:Vec<u8> = unpacker.unpack_variable_len_opaque()?;
	Ok((flavor, body))
}

// Returns the xid of an accepted, successful reply; everything else becomes an error
pub fn unpack_replyheader(unpacker:&mut Unpacker) -> io::Result<u32> {
	let xid:u32 = unpacker.unpack_u32()?;

	if unpacker.unpack_enum()? != REPLY { return Err(err("Expected REPLY message type")); }

	match unpacker.unpack_enum()? {
		MSG_DENIED => {
			return match unpacker.unpack_enum()? {
				RPC_MISMATCH => {
					unpacker.unpack_u32()?;	// low version
					unpacker.unpack_u32()?;	// high version
					Err(err("Message denied due to RPC_MISMATCH"))
				},
				AUTH_ERROR => {
					unpacker.unpack_u32()?;	// auth_stat
					Err(err("Message denied due to AUTH_ERROR"))
				},
				_ => Err(err("Message denied for an unknown reason")),
			};
		},
		MSG_ACCEPTED => { },
		_ => return Err(err("Neither MSG_DENIED nor MSG_ACCEPTED in reply header")),
	}

	unpack_auth(unpacker)?;

	match unpacker.unpack_enum()? {
		SUCCESS       => Ok(xid),
		PROG_UNAVAIL  => Err(err("Program unavailable")),
		PROG_MISMATCH => {
			unpacker.unpack_u32()?;
			unpacker.unpack_u32()?;
			Err(err("Program version mismatch"))
		},
		PROC_UNAVAIL  => Err(err("Procedure unavailable")),
		GARBAGE_ARGS  => Err(err("Remote could not decode arguments")),
		SYSTEM_ERR    => Err(err("Remote system error")),
		_             => Err(err("Call failed for unknown reason")),
	}
}

pub fn unpack_callheader(unpacker:&mut Unpacker) -> io::Result<CallHeader> {
	let xid:u32 = unpacker.unpack_u32()?;
	if unpacker.unpack_enum()? != CALL { return Err(err("Expected CALL message type")); }
	if unpacker.unpack_u32()? != RPCVERSION { return Err(err("Unsupported RPC version")); }

	let prog:u32 = unpacker.unpack_u32()?;
	let vers:u32 = unpacker.unpack_u32()?;
	let prc:u32  = unpacker.unpack_u32()?;
	unpack_auth(unpacker)?;	// cred
	unpack_auth(unpacker)?;	// verf

	Ok(CallHeader{ xid, prog, vers, prc })
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rpc::xdr_pack::{pack_callheader_no_auth, pack_replyheader};
	use crate::xdr::Packer;

	#[test]
	fn call_header_survives_packing() {
		let mut p = Packer::new();
		pack_callheader_no_auth(&mut p, 42, 0x0607af, 1, 11).unwrap();
		let mut u = Unpacker::new();
		u.reset(p.as_bytes());
		assert_eq!(unpack_callheader(&mut u).unwrap(), CallHeader{ xid: 42, prog: 0x0607af, vers: 1, prc: 11 });
		assert!(u.all_data_consumed());
	}

	#[test]
	fn accepted_reply_yields_xid() {
		let mut p = Packer::new();
		pack_replyheader(&mut p, 7).unwrap();
		let mut u = Unpacker::new();
		u.reset(p.as_bytes());
		assert_eq!(unpack_replyheader(&mut u).unwrap(), 7);
	}

	#[test]
	fn denied_reply_is_an_error() {
		let mut p = Packer::new();
		p.pack_u32(7).unwrap();
		p.pack_enum(REPLY).unwrap();
		p.pack_enum(MSG_DENIED).unwrap();
		p.pack_enum(AUTH_ERROR).unwrap();
		p.pack_u32(1).unwrap();
		let mut u = Unpacker::new();
		u.reset(p.as_bytes());
		assert!(unpack_replyheader(&mut u).is_err());
	}
}
