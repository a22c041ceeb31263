use log::{debug, error, info};

use super::container::Container;
use super::obfuscate::xor_stream;
use crate::error::Result;
use crate::huffman_coding::huffman::huf_decode;
use crate::tools::freq_count::FreqTable;

/// Decompress a container made by `compress`.
///
/// A protected container fails with an authentication error when the password attempt is
/// missing or wrong, before the table or body is read. The attempt is ignored for containers
/// made without a password. Any structural problem fails with a corruption error.
pub fn decompress(data: &[u8], password: Option<&str>) -> Result<Vec<u8>> {
    let container = Container::parse(data)?;

    if let Err(e) = container.verify(password) {
        error!("Fatal error: {}.", e);
        return Err(e.into());
    }

    let table = FreqTable::from_bytes(container.table).map_err(|e| {
        error!("Fatal error: {}.", e);
        e
    })?;
    debug!(
        "Read frequency table with {} symbols covering {} bytes.",
        table.symbols(),
        table.total()
    );

    let mut body = container.body.to_vec();
    if container.protected {
        xor_stream(&mut body, password);
    }

    let out = huf_decode(&body, &table).map_err(|e| {
        error!("Fatal error: {}.", e);
        e
    })?;
    info!("Decompressed {} bytes to {} bytes.", data.len(), out.len());
    Ok(out)
}
