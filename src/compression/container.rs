//! The hufvault container.
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 0 | 1 | password flag, 0x00 or 0x01 |
//! | 1 | 32 | SHA-256 of the password, zero filled without one |
//! | 33 | 4 | length L of the frequency table, big endian |
//! | 37 | L | frequency table |
//! | 37+L | rest | packed body, XORed with the password when the flag is set |
//!

use log::error;
use sha2::{Digest, Sha256};

use super::obfuscate::active_password;
use crate::error::{AuthError, CorruptError};
use crate::tools::freq_count::FreqTable;

pub const DIGEST_SIZE: usize = 32;
const FLAG_OFFSET: usize = 0;
const DIGEST_OFFSET: usize = 1;
const LEN_OFFSET: usize = DIGEST_OFFSET + DIGEST_SIZE;
/// Bytes in front of the frequency table.
pub const HEADER_SIZE: usize = LEN_OFFSET + 4;

/// SHA-256 of the password's UTF-8 bytes.
pub fn password_digest(password: &str) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let mut digest = [0_u8; DIGEST_SIZE];
    digest.copy_from_slice(&hasher.finalize());
    digest
}

/// Write the header and body. `body` must already be obfuscated when a password is given.
pub fn assemble(password: Option<&str>, freqs: &FreqTable, body: &[u8]) -> Vec<u8> {
    let table = freqs.to_bytes();
    let mut out = Vec::with_capacity(HEADER_SIZE + table.len() + body.len());
    match active_password(password) {
        Some(pw) => {
            out.push(1);
            out.extend_from_slice(&password_digest(pw));
        }
        None => {
            out.push(0);
            out.extend_from_slice(&[0; DIGEST_SIZE]);
        }
    }
    out.extend_from_slice(&(table.len() as u32).to_be_bytes());
    out.extend_from_slice(&table);
    out.extend_from_slice(body);
    out
}

/// A container split into its fields. Nothing past the header has been interpreted yet.
#[derive(Debug)]
pub struct Container<'a> {
    pub protected: bool,
    pub digest: [u8; DIGEST_SIZE],
    /// Serialized frequency table
    pub table: &'a [u8],
    pub body: &'a [u8],
}

impl<'a> Container<'a> {
    /// Split a container into header fields, table bytes and body.
    pub fn parse(data: &'a [u8]) -> Result<Self, CorruptError> {
        if data.len() < HEADER_SIZE {
            error!("Fatal error: container is only {} bytes long.", data.len());
            return Err(CorruptError::TruncatedHeader {
                required: HEADER_SIZE,
                actual: data.len(),
            });
        }
        let protected = match data[FLAG_OFFSET] {
            0 => false,
            1 => true,
            other => {
                error!("Fatal error: found invalid password flag {:#04x}.", other);
                return Err(CorruptError::InvalidFlag(other));
            }
        };
        let mut digest = [0_u8; DIGEST_SIZE];
        digest.copy_from_slice(&data[DIGEST_OFFSET..LEN_OFFSET]);

        let mut len = [0_u8; 4];
        len.copy_from_slice(&data[LEN_OFFSET..HEADER_SIZE]);
        let declared = u32::from_be_bytes(len) as usize;
        let rest = &data[HEADER_SIZE..];
        if declared > rest.len() {
            error!("Fatal error: frequency table runs past the end of the container.");
            return Err(CorruptError::TableOverrun {
                declared,
                available: rest.len(),
            });
        }
        let (table, body) = rest.split_at(declared);
        Ok(Self {
            protected,
            digest,
            table,
            body,
        })
    }

    /// Check a password attempt against the stored digest. Unprotected containers accept any
    /// attempt, including none.
    pub fn verify(&self, attempt: Option<&str>) -> Result<(), AuthError> {
        if !self.protected {
            return Ok(());
        }
        match active_password(attempt) {
            None => Err(AuthError::PasswordRequired),
            Some(pw) if password_digest(pw) == self.digest => Ok(()),
            Some(_) => Err(AuthError::WrongPassword),
        }
    }
}
