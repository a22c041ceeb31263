use crate::error::CorruptError;

/// Two byte entry count at the front of a serialized table.
const COUNT_SIZE: usize = 2;
/// One symbol byte plus a u64 count.
const ENTRY_SIZE: usize = 9;

/// Occurrence count for every byte value present in the input.
///
/// Iteration is always in ascending symbol order. Both the compressor and the decompressor build
/// the huffman tree from this order, so it must never depend on anything but the counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreqTable {
    counts: [u64; 256],
}

impl FreqTable {
    /// An empty table (no symbols).
    pub fn new() -> Self {
        Self { counts: [0; 256] }
    }

    /// Count every byte of the input in a single pass.
    pub fn from_data(data: &[u8]) -> Self {
        let mut table = Self::new();
        data.iter().for_each(|&el| table.counts[el as usize] += 1);
        table
    }

    /// Count for one symbol (0 when absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Number of distinct symbols.
    pub fn symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Sum of all counts, which is the length of the original data.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// (symbol, count) for each present symbol, ascending by symbol.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c > 0)
            .map(|(sym, &c)| (sym as u8, c))
    }

    /// Serialize as `[entries: u16 BE]` followed by `[symbol: u8][count: u64 BE]` per entry.
    pub fn to_bytes(&self) -> Vec<u8> {
        let entries = self.symbols();
        let mut out = Vec::with_capacity(COUNT_SIZE + entries * ENTRY_SIZE);
        out.extend_from_slice(&(entries as u16).to_be_bytes());
        for (sym, count) in self.iter() {
            out.push(sym);
            out.extend_from_slice(&count.to_be_bytes());
        }
        out
    }

    /// Parse a table written by [`FreqTable::to_bytes`]. Anything that `to_bytes` could not have
    /// produced is rejected.
    pub fn from_bytes(buf: &[u8]) -> Result<Self, CorruptError> {
        if buf.len() < COUNT_SIZE {
            return Err(CorruptError::BadTable(format!(
                "{} bytes is too short for the entry count",
                buf.len()
            )));
        }
        let entries = u16::from_be_bytes([buf[0], buf[1]]) as usize;
        if entries > 256 {
            return Err(CorruptError::BadTable(format!(
                "{} entries declared, at most 256 allowed",
                entries
            )));
        }
        if buf.len() != COUNT_SIZE + entries * ENTRY_SIZE {
            return Err(CorruptError::BadTable(format!(
                "{} entries need {} bytes, got {}",
                entries,
                COUNT_SIZE + entries * ENTRY_SIZE,
                buf.len()
            )));
        }

        let mut table = Self::new();
        let mut last: Option<u8> = None;
        let mut total = 0_u64;
        for entry in buf[COUNT_SIZE..].chunks_exact(ENTRY_SIZE) {
            let sym = entry[0];
            if last.map_or(false, |prev| sym <= prev) {
                return Err(CorruptError::BadTable(format!(
                    "symbol {} is out of order or repeated",
                    sym
                )));
            }
            let mut raw = [0_u8; 8];
            raw.copy_from_slice(&entry[1..]);
            let count = u64::from_be_bytes(raw);
            if count == 0 {
                return Err(CorruptError::BadTable(format!("symbol {} has a zero count", sym)));
            }
            total = total
                .checked_add(count)
                .ok_or_else(|| CorruptError::BadTable("total count overflows".to_string()))?;
            table.counts[sym as usize] = count;
            last = Some(sym);
        }
        Ok(table)
    }
}

impl Default for FreqTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a frequency count of the input data.
pub fn freqs(data: &[u8]) -> FreqTable {
    FreqTable::from_data(data)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn count_test() {
        let table = freqs(&[0, 0, 0, 1]);
        assert_eq!(table.get(0), 3);
        assert_eq!(table.get(1), 1);
        assert_eq!(table.get(2), 0);
        assert_eq!(table.symbols(), 2);
        assert_eq!(table.total(), 4);
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![(0, 3), (1, 1)]);
    }

    #[test]
    fn empty_test() {
        let table = freqs(&[]);
        assert!(table.is_empty());
        assert_eq!(table.symbols(), 0);
        assert_eq!(table.to_bytes(), vec![0, 0]);
        assert_eq!(FreqTable::from_bytes(&[0, 0]), Ok(FreqTable::new()));
    }

    #[test]
    fn serialize_test() {
        let table = freqs("abracadabra".as_bytes());
        let bytes = table.to_bytes();
        assert_eq!(bytes.len(), 2 + 5 * 9);
        assert_eq!(&bytes[..2], &[0, 5]);
        // 'a' is first and appears five times
        assert_eq!(bytes[2], b'a');
        assert_eq!(&bytes[3..11], &5_u64.to_be_bytes());
        assert_eq!(FreqTable::from_bytes(&bytes), Ok(table));
    }

    #[test]
    fn all_symbols_test() {
        let data = (0..=255).collect::<Vec<u8>>();
        let table = freqs(&data);
        assert_eq!(table.symbols(), 256);
        assert_eq!(FreqTable::from_bytes(&table.to_bytes()), Ok(table));
    }

    #[test]
    fn reject_short_test() {
        assert!(FreqTable::from_bytes(&[]).is_err());
        assert!(FreqTable::from_bytes(&[0]).is_err());
    }

    #[test]
    fn reject_length_mismatch_test() {
        let mut bytes = freqs(b"hello").to_bytes();
        bytes.pop();
        assert!(FreqTable::from_bytes(&bytes).is_err());
    }

    #[test]
    fn reject_too_many_entries_test() {
        let mut bytes = vec![0x01, 0x01];
        bytes.resize(2 + 257 * 9, 1);
        assert!(FreqTable::from_bytes(&bytes).is_err());
    }

    #[test]
    fn reject_unordered_test() {
        let mut bytes = vec![0, 2];
        bytes.push(b'b');
        bytes.extend_from_slice(&1_u64.to_be_bytes());
        bytes.push(b'a');
        bytes.extend_from_slice(&1_u64.to_be_bytes());
        assert!(FreqTable::from_bytes(&bytes).is_err());
    }

    #[test]
    fn reject_zero_count_test() {
        let mut bytes = vec![0, 1, b'a'];
        bytes.extend_from_slice(&0_u64.to_be_bytes());
        assert!(FreqTable::from_bytes(&bytes).is_err());
    }

    #[test]
    fn reject_overflow_test() {
        let mut bytes = vec![0, 2];
        bytes.push(b'a');
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        bytes.push(b'b');
        bytes.extend_from_slice(&1_u64.to_be_bytes());
        assert!(FreqTable::from_bytes(&bytes).is_err());
    }
}
