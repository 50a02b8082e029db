//! Bounded byte reader and writer primitives for the wadlz codec.
//!
//! This crate provides [`ByteWriter`] and [`ByteReader`] for byte-level encoding
//! and decoding of packet streams.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are checked against an explicit region end.
//! - **No format knowledge** - This crate knows nothing about packets or headers.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use bytestream::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u8(0x11);
//! writer.write_u32_le(42);
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u8().unwrap(), 0x11);
//! assert_eq!(reader.read_u32_le().unwrap(), 42);
//! ```

mod error;
mod reader;
mod writer;

pub use error::{ByteError, ByteResult};
pub use reader::ByteReader;
pub use writer::ByteWriter;
