//! Fixed-size binary records exchanged between the coordinator and agents.
//!
//! Every field is a little-endian `i32` written at an explicit offset, so the
//! layout never depends on how either side lays out its structs in memory.
//! There is no length prefix: both ends know the sizes.
//!
//! ```text
//! PerceptionMessage (52 bytes)
//!   0  self.x        4  self.y
//!   8  adversary.x  12  adversary.y
//!  16  blocked_count
//!  20  blocked[0].x 24  blocked[0].y  ...  44 blocked[3].x 48 blocked[3].y
//!
//! MoveRequest (8 bytes)
//!   0  requested.x   4  requested.y
//! ```

use crate::error::ProtocolError;
use crate::types::Coordinate;
use std::io::{ErrorKind, Read, Write};

/// Number of neighbour slots in a perception.
pub const MAX_BLOCKED: usize = 4;

/// What an agent is allowed to know before its next decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerceptionMessage {
    /// The agent's own position.
    pub position: Coordinate,
    /// Nearest live adversary, or [`Coordinate::INVALID`] if there is none.
    pub adversary: Coordinate,
    blocked: [Coordinate; MAX_BLOCKED],
    blocked_len: usize,
}

impl PerceptionMessage {
    pub const SIZE: usize = 4 * (5 + 2 * MAX_BLOCKED);

    pub fn new(position: Coordinate, adversary: Coordinate) -> Self {
        Self {
            position,
            adversary,
            blocked: [Coordinate::INVALID; MAX_BLOCKED],
            blocked_len: 0,
        }
    }

    /// Record a blocked neighbour. Returns `false` once all slots are used.
    pub fn block(&mut self, coord: Coordinate) -> bool {
        if self.blocked_len == MAX_BLOCKED {
            return false;
        }
        self.blocked[self.blocked_len] = coord;
        self.blocked_len += 1;
        true
    }

    pub fn blocked(&self) -> &[Coordinate] {
        &self.blocked[..self.blocked_len]
    }

    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        self.blocked().contains(&coord)
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        put_coord(&mut buf, 0, self.position);
        put_coord(&mut buf, 8, self.adversary);
        put_i32(&mut buf, 16, self.blocked_len as i32);
        // Unused slots still hold INVALID, keeping the encoding deterministic.
        for (slot, coord) in self.blocked.iter().enumerate() {
            put_coord(&mut buf, 20 + slot * 8, *coord);
        }
        buf
    }

    pub fn decode(buf: &[u8; Self::SIZE]) -> Result<Self, ProtocolError> {
        let count = get_i32(buf, 16);
        if !(0..=MAX_BLOCKED as i32).contains(&count) {
            return Err(ProtocolError::BlockedCount(count));
        }
        let mut message = Self::new(get_coord(buf, 0), get_coord(buf, 8));
        for slot in 0..count as usize {
            message.block(get_coord(buf, 20 + slot * 8));
        }
        Ok(message)
    }

    /// Read one record. `Ok(None)` means the peer closed the channel cleanly
    /// between records.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>, ProtocolError> {
        let mut buf = [0u8; Self::SIZE];
        if !read_record(reader, &mut buf, "perception message")? {
            return Ok(None);
        }
        Self::decode(&buf).map(Some)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), ProtocolError> {
        write_record(writer, &self.encode())
    }
}

/// The single cell an agent asks to occupy next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub requested: Coordinate,
}

impl MoveRequest {
    pub const SIZE: usize = 8;

    pub fn new(requested: Coordinate) -> Self {
        Self { requested }
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        put_coord(&mut buf, 0, self.requested);
        buf
    }

    pub fn decode(buf: &[u8; Self::SIZE]) -> Self {
        Self::new(get_coord(buf, 0))
    }

    /// Read one record. `Ok(None)` means the peer closed the channel cleanly
    /// between records.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Option<Self>, ProtocolError> {
        let mut buf = [0u8; Self::SIZE];
        if !read_record(reader, &mut buf, "move request")? {
            return Ok(None);
        }
        Ok(Some(Self::decode(&buf)))
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<(), ProtocolError> {
        write_record(writer, &self.encode())
    }
}

fn put_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_i32(buf: &[u8], offset: usize) -> i32 {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&buf[offset..offset + 4]);
    i32::from_le_bytes(bytes)
}

fn put_coord(buf: &mut [u8], offset: usize, coord: Coordinate) {
    put_i32(buf, offset, coord.row);
    put_i32(buf, offset + 4, coord.col);
}

fn get_coord(buf: &[u8], offset: usize) -> Coordinate {
    Coordinate::new(get_i32(buf, offset), get_i32(buf, offset + 4))
}

/// Fill `buf` completely. Returns `false` on EOF before the first byte.
fn read_record<R: Read>(
    reader: &mut R,
    buf: &mut [u8],
    record: &'static str,
) -> Result<bool, ProtocolError> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => {
                return Err(ProtocolError::Truncated {
                    record,
                    expected: buf.len(),
                    got: filled,
                })
            }
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(ProtocolError::Read(e)),
        }
    }
    Ok(true)
}

fn write_record<W: Write>(writer: &mut W, bytes: &[u8]) -> Result<(), ProtocolError> {
    writer.write_all(bytes).map_err(ProtocolError::Write)?;
    writer.flush().map_err(ProtocolError::Write)
}
