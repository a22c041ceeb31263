//! The bitstream module forms the bit-level I/O for hufvault.
//!
//! Huffman codes are variable length, so the encoded body is a stream of bits rather than bytes.
//! BitPacker turns codes into a dense byte buffer, most significant bit first. BitReader walks
//! such a buffer back one bit at a time.
//!
//! Every packed body starts with one byte holding the number of zero bits (0-7) appended at the
//! end to fill out the last byte. An empty body means there was no data at all.
//!
pub mod bitpacker;
pub mod bitreader;
