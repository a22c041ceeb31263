//! The compression module holds the public compress and decompress calls and the container
//! format that wraps a compressed body.
//!
//! Compression happens in the following steps:
//! - Frequency count: how often each byte value appears.
//! - Huffman coding: build the tree, derive the codes, pack the codes into a body.
//! - Obfuscation: if a password was given, XOR the body with the repeating password bytes.
//! - Container: write the header (password flag, password digest, frequency table) and the body.
//!
//! Decompression is the inverse. The password is checked against the stored digest before the
//! body is touched.
//!
//! The XOR step is an access gate, not encryption. Anyone who knows part of the plaintext can
//! recover the key stream.
//!
//! Each call owns all of its working state, so calls on different threads never interact.
//!

pub mod compress;
pub mod container;
pub mod decompress;
pub mod obfuscate;
