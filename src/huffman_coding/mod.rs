//! The huffman module turns a frequency table into prefix codes and uses them to encode and
//! decode the body of a hufvault container.
//!
//! The tree is never stored. The decompressor rebuilds it from the frequency table saved in the
//! header, so building the tree must give the same shape every time it sees the same table.
//! Nodes are ordered by weight and then by the order they were created in, which pins down
//! every tie.
//!
//! A table with a single symbol gives a tree with no edges. That symbol is assigned the code `0`.
//!

pub mod huffman;
