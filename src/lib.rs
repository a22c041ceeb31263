//! hufvault: huffman compression in a self-describing container.
//!
//! Version 0.1.0
//!
//! Compresses any byte sequence with prefix codes built from the sequence's own byte
//! frequencies. The container carries the frequency table, so it can be decoded with nothing
//! else. An optional password gates access: its SHA-256 is stored in the header and the body is
//! XORed with the password bytes. That gate is not encryption.
//!
//! Basic usage to compress a file is as follows:
//!
//! `$> hufvault -z test.txt`
//!
//! This will compress the file and create the file test.txt.bin.
//! The original file will be deleted unless -k is given.
//!
//! As a library:
//!
//! ```
//! let packed = hufvault::compress(b"hello hello", Some("pw")).unwrap();
//! assert_eq!(hufvault::decompress(&packed, Some("pw")).unwrap(), b"hello hello");
//! ```
//!
pub mod bitstream;
pub mod compression;
pub mod error;
pub mod huffman_coding;
pub mod tools;

pub use compression::compress::compress;
pub use compression::decompress::decompress;
pub use error::{AuthError, CorruptError, Error, Result};
