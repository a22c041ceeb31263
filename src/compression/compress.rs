use log::{debug, info};

use super::container::assemble;
use super::obfuscate::{active_password, xor_stream};
use crate::error::Result;
use crate::huffman_coding::huffman::huf_encode;
use crate::tools::freq_count::freqs;

/// Compress `data` into a self-describing container, gated by `password` when one is given.
///
/// Empty data is fine and gives a container with an empty table and an empty body. The output
/// can be larger than the input when the data is close to uniformly random.
pub fn compress(data: &[u8], password: Option<&str>) -> Result<Vec<u8>> {
    let password = active_password(password);

    // Count frequencies, then encode against the tree they give.
    let table = freqs(data);
    debug!(
        "Found {} distinct symbols in {} bytes.",
        table.symbols(),
        data.len()
    );
    let mut body = huf_encode(data, &table);

    if password.is_some() {
        xor_stream(&mut body, password);
        debug!("Obfuscated {} body bytes.", body.len());
    }

    let out = assemble(password, &table, &body);
    info!(
        "Compressed {} bytes to {} bytes (body {}, password {}).",
        data.len(),
        out.len(),
        body.len(),
        if password.is_some() { "set" } else { "not set" }
    );
    Ok(out)
}
