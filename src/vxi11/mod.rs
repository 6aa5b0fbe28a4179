
// Device core
pub const DEVICE_CORE_PROG:u32  = 0x0607af;
pub const DEVICE_CORE_VERS:u32  = 1;
pub const CREATE_LINK:u32       = 10;
pub const DEVICE_WRITE:u32      = 11;
pub const DEVICE_READ:u32       = 12;
pub const DESTROY_LINK:u32      = 23;

pub const CLIENT_ID:i32 = 3333;
pub const DEFAULT_IO_TIMEOUT_MS:u32 = 10000;
pub const DEFAULT_DEVICE_NAME:&str = "inst0";

pub const OPERATION_FLAGS_END:i32 = 8;

// Reason bits in a device_read response
pub const REASON_REQCNT:i32 = 1;
pub const REASON_CHR:i32    = 2;
pub const REASON_END:i32    = 4;

// Asking for more than this in one read just makes instruments split the response anyway
const READ_REQUEST_SIZE:u32 = 1024 * 1024;

use std::io::{self, Error, ErrorKind};
use std::time::Duration;

use crate::rpc::port_mapping::{TcpPortMapperClient, Mapping, Protocol};
use crate::rpc::tcp_clients::TcpClient;

pub mod xdr_pack;

fn err(msg:&str) -> io::Error { Error::new(ErrorKind::Other, msg) }

// Device_ErrorCode values from the VXI-11 specification
pub fn device_error(code:i32) -> io::Error {
    match code {
        1  => err("Syntax error"),
        3  => Error::new(ErrorKind::NotConnected, "Device not accessible"),
        4  => err("Invalid link identifier"),
        5  => Error::new(ErrorKind::InvalidInput, "Parameter error"),
        6  => err("Channel not established"),
        8  => err("Operation not supported"),
        9  => err("Out of resources"),
        11 => err("Device locked by another link"),
        12 => err("No lock held by this link"),
        15 => Error::new(ErrorKind::TimedOut, "I/O timeout"),
        17 => err("I/O error"),
        21 => Error::new(ErrorKind::InvalidInput, "Invalid address"),
        23 => Error::new(ErrorKind::Interrupted, "Abort"),
        29 => err("Channel already established"),
        x  => Error::new(ErrorKind::Other, format!("Unknown VXI-11 device error {}", x)),
    }
}

fn check(code:i32) -> io::Result<()> {
    if code == 0 { Ok(()) } else { Err(device_error(code)) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub link_id: i32,
    pub abort_port: u16,
    pub max_recv_size: u32,
}

pub struct CoreClient {
    client: TcpClient,
    io_timeout_ms: u32,
    opt_link: Option<Link>,
}

impl CoreClient {

    // Asks the port mapper on `host` where the core program lives, then connects there
    pub fn new(host:&str, timeout:Option<Duration>) -> io::Result<Self> {
        let mut pmap_client = TcpPortMapperClient::new(host, timeout)?;

        let mapping = Mapping {
            program: DEVICE_CORE_PROG,
            version: DEVICE_CORE_VERS,
            protocol: Protocol::Tcp,
            port: 0,
        };

        let port = pmap_client.get_port(&mapping)?;
        log::debug!("VXI-11 core channel for {} is on port {}", host, port);

        Self::with_port(host, port, timeout)
    }

    // Skips the port mapper when the core port is already known
    pub fn with_port(host:&str, port:u16, timeout:Option<Duration>) -> io::Result<Self> {
        let client = TcpClient::connect((host, port), DEVICE_CORE_PROG, DEVICE_CORE_VERS, timeout)?;
        let io_timeout_ms = timeout
            .map(|t| t.as_millis().min(u32::MAX as u128) as u32)
            .unwrap_or(DEFAULT_IO_TIMEOUT_MS);
        Ok(CoreClient{ client, io_timeout_ms, opt_link: None })
    }

    pub fn link(&self) -> Option<Link> { self.opt_link }

    fn get_link(&self) -> io::Result<Link> {
        self.opt_link.ok_or_else(|| Error::new(ErrorKind::NotConnected, "No link"))
    }

    pub fn create_link(&mut self, device:&str) -> io::Result<Link> {
        if self.opt_link.is_some() {
            return Err(err("Already connected to a link"));
        }

        self.client.start_call(CREATE_LINK)?;
        xdr_pack::pack_create_link_parms(&mut self.client.packer, CLIENT_ID, false, self.io_timeout_ms, device)?;
        self.client.do_call()?;

        let error:i32         = self.client.unpacker.unpack_i32()?;
        let link_id:i32       = self.client.unpacker.unpack_i32()?;
        let abort_port:u32    = self.client.unpacker.unpack_u32()?;
        let max_recv_size:u32 = self.client.unpacker.unpack_u32()?;
        check(error)?;

        let link = Link{ link_id, abort_port: abort_port as u16, max_recv_size };
        log::debug!("created VXI-11 link {:?} to {}", link, device);
        self.opt_link = Some(link);
        Ok(link)
    }

    pub fn ask(&mut self, data:&[u8]) -> io::Result<Vec<u8>> {
        self.write(data)?;
        self.read()
    }

    // Splits the message to respect the device's max_recv_size; END goes on the last piece only
    pub fn write(&mut self, data:&[u8]) -> io::Result<()> {
        let link = self.get_link()?;
        let chunk_len = if link.max_recv_size == 0 { data.len().max(1) } else { link.max_recv_size as usize };

        let mut chunks = data.chunks(chunk_len).peekable();
        if chunks.peek().is_none() {
            return self.write_chunk(link.link_id, &[], true);
        }
        while let Some(chunk) = chunks.next() {
            let last = chunks.peek().is_none();
            self.write_chunk(link.link_id, chunk, last)?;
        }
        Ok(())
    }

    fn write_chunk(&mut self, link_id:i32, chunk:&[u8], last:bool) -> io::Result<()> {
        let flags = if last { OPERATION_FLAGS_END } else { 0 };

        self.client.start_call(DEVICE_WRITE)?;
        xdr_pack::pack_device_write_parms(&mut self.client.packer, link_id, self.io_timeout_ms, self.io_timeout_ms, flags, chunk)?;
        self.client.do_call()?;

        let error:i32 = self.client.unpacker.unpack_i32()?;
        let size:u32  = self.client.unpacker.unpack_u32()?;
        check(error)?;

        if size as usize != chunk.len() {
            return Err(err("Number of bytes in confirmation doesn't match number of bytes sent"));
        }
        Ok(())
    }

    // Keeps reading until the device flags END or a termination character
    pub fn read(&mut self) -> io::Result<Vec<u8>> {
        let link = self.get_link()?;
        let mut ans:Vec<u8> = vec![];

        loop {
            self.client.start_call(DEVICE_READ)?;
            xdr_pack::pack_device_read_parms(&mut self.client.packer, link.link_id, READ_REQUEST_SIZE, self.io_timeout_ms, self.io_timeout_ms, 0, 0)?;
            self.client.do_call()?;

            let error:i32  = self.client.unpacker.unpack_i32()?;
            let reason:i32 = self.client.unpacker.unpack_i32()?;
            let data       = self.client.unpacker.unpack_variable_len_opaque()?;
            check(error)?;

            ans.extend_from_slice(&data);

            if reason & (REASON_END | REASON_CHR) != 0 { return Ok(ans); }
            if reason & REASON_REQCNT == 0 {
                return Err(err("Expected one of three reason bits to be set"));
            }
        }
    }

    pub fn destroy_link(&mut self) -> io::Result<()> {
        let link = self.opt_link.take().ok_or_else(|| err("No link to destroy"))?;

        self.client.start_call(DESTROY_LINK)?;
        xdr_pack::pack_device_link(&mut self.client.packer, link.link_id)?;
        self.client.do_call()?;

        check(self.client.unpacker.unpack_i32()?)?;
        log::debug!("destroyed VXI-11 link {}", link.link_id);
        Ok(())
    }

}
