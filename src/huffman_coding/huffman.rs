use log::{debug, trace};
use rustc_hash::FxHashMap;

use crate::bitstream::bitpacker::{padding_for, BitPacker};
use crate::bitstream::bitreader::BitReader;
use crate::error::CorruptError;
use crate::tools::freq_count::FreqTable;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::{Display, Formatter};

#[derive(Eq, PartialEq, Debug, Clone)]
pub enum NodeData {
    Kids(Box<Node>, Box<Node>),
    Leaf(u8),
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Node {
    pub weight: u64,
    /// Creation order. Leaves take 0..k in symbol order, merged nodes follow.
    pub seq: u32,
    pub node_data: NodeData,
}

impl Node {
    /// Create a new node
    pub fn new(weight: u64, seq: u32, node_data: NodeData) -> Node {
        Node {
            weight,
            seq,
            node_data,
        }
    }

    /// Count of all nodes in this subtree, leaves included.
    pub fn count(&self) -> usize {
        match &self.node_data {
            NodeData::Kids(left, right) => 1 + left.count() + right.count(),
            NodeData::Leaf(_) => 1,
        }
    }
}

impl Ord for Node {
    /// Reversed so that BinaryHeap pops the lightest node first, and the oldest of equal weight.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Build the huffman tree for a frequency table. Returns None for an empty table.
pub fn build_tree(freqs: &FreqTable) -> Option<Node> {
    let mut heap: BinaryHeap<Node> = freqs
        .iter()
        .enumerate()
        .map(|(i, (sym, weight))| Node::new(weight, i as u32, NodeData::Leaf(sym)))
        .collect();
    let mut next_seq = heap.len() as u32;

    // Pull off the two lightest nodes and join them until one is left. First out goes left.
    while heap.len() > 1 {
        let (Some(left_child), Some(right_child)) = (heap.pop(), heap.pop()) else {
            break;
        };
        heap.push(Node::new(
            left_child.weight + right_child.weight,
            next_seq,
            NodeData::Kids(Box::new(left_child), Box::new(right_child)),
        ));
        next_seq += 1;
    }
    heap.pop()
}

/// A huffman code, right aligned in `bits`.
///
/// Depth is bounded by the u64 total of the frequency table (a fibonacci shaped table is the
/// worst case), which keeps every code well under 128 bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code {
    pub bits: u128,
    pub len: u8,
}

impl Code {
    /// This code with one more bit on the end.
    pub fn push(self, bit: bool) -> Code {
        Code {
            bits: self.bits << 1 | bit as u128,
            len: self.len + 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in (0..self.len).rev() {
            write!(f, "{}", (self.bits >> i) & 1)?;
        }
        Ok(())
    }
}

/// Symbol to code and code to symbol maps derived from one tree.
#[derive(Debug, Clone)]
pub struct CodeTable {
    codes: [Code; 256],
    symbols: FxHashMap<Code, u8>,
    max_len: u8,
}

impl CodeTable {
    /// Walk the tree, appending 0 going left and 1 going right.
    pub fn from_tree(root: Option<&Node>) -> Self {
        let mut table = CodeTable {
            codes: [Code::default(); 256],
            symbols: FxHashMap::default(),
            max_len: 0,
        };
        match root {
            None => {}
            // A lone leaf has no edges to walk.
            Some(Node {
                node_data: NodeData::Leaf(sym),
                ..
            }) => table.insert(*sym, Code::default().push(false)),
            Some(node) => table.walk(node, Code::default()),
        }
        table
    }

    /// Build the tree for a frequency table and derive its codes.
    pub fn from_freqs(freqs: &FreqTable) -> Self {
        let tree = build_tree(freqs);
        if let Some(root) = &tree {
            debug!(
                "Built huffman tree with {} nodes for {} symbols.",
                root.count(),
                freqs.symbols()
            );
        }
        Self::from_tree(tree.as_ref())
    }

    fn walk(&mut self, node: &Node, code: Code) {
        match &node.node_data {
            NodeData::Kids(left_child, right_child) => {
                self.walk(left_child, code.push(false));
                self.walk(right_child, code.push(true));
            }
            NodeData::Leaf(sym) => self.insert(*sym, code),
        }
    }

    fn insert(&mut self, sym: u8, code: Code) {
        trace!("Symbol {:#04x} gets code {}", sym, code);
        self.codes[sym as usize] = code;
        self.symbols.insert(code, sym);
        self.max_len = self.max_len.max(code.len);
    }

    /// The code for a symbol. Empty if the symbol is not in the table.
    pub fn code(&self, sym: u8) -> Code {
        self.codes[sym as usize]
    }

    /// The symbol for a complete code, if there is one.
    pub fn symbol(&self, code: &Code) -> Option<u8> {
        self.symbols.get(code).copied()
    }

    /// Length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.max_len
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Total bits needed to encode data with these frequencies.
    pub fn encoded_bits(&self, freqs: &FreqTable) -> u64 {
        freqs
            .iter()
            .map(|(sym, count)| count * self.code(sym).len as u64)
            .sum()
    }
}

/// Encode data into a packed body: the padding count byte, every symbol's code in input order,
/// then zero bits out to the byte boundary. Empty data gives an empty body.
///
/// `freqs` must be the frequency table of `data`.
pub fn huf_encode(data: &[u8], freqs: &FreqTable) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }
    let table = CodeTable::from_freqs(freqs);
    let bits = table.encoded_bits(freqs);
    let padding = padding_for(bits);

    let mut bp = BitPacker::new((bits / 8) as usize + 2);
    bp.out8(padding);
    for &sym in data {
        let code = table.code(sym);
        bp.out_bits(code.bits, code.len);
    }
    bp.flush();
    debug!(
        "Encoded {} bytes with {} codes into {} bits plus {} padding bits, body ends at {} ({} bits in the last byte).",
        data.len(),
        table.len(),
        bits,
        padding,
        bp.loc(),
        bp.last_bits
    );
    bp.output
}

/// Decode a packed body using the tree rebuilt from `freqs`.
///
/// Bits are gathered into a candidate code until the candidate names a symbol. A candidate
/// longer than every code, or one left over at the end, means the body is corrupt.
pub fn huf_decode(body: &[u8], freqs: &FreqTable) -> Result<Vec<u8>, CorruptError> {
    let expected = freqs.total();
    // An empty body is only valid for empty data. Otherwise the body was cut off.
    if body.is_empty() {
        if expected == 0 {
            return Ok(Vec::new());
        }
        return Err(CorruptError::LengthMismatch {
            expected,
            actual: 0,
        });
    }
    let mut br = BitReader::new(body);
    let payload = br.strip_padding()?;
    let table = CodeTable::from_freqs(freqs);
    if table.is_empty() && payload > 0 {
        return Err(CorruptError::UnknownCode { position: 0 });
    }

    // Every symbol takes at least one bit, so the payload caps the output size.
    let mut out = Vec::with_capacity((expected as usize).min(payload));
    let mut candidate = Code::default();
    for position in 0..payload {
        let bit = br
            .bool_bit()
            .ok_or(CorruptError::IncompleteCode { bits: candidate.len as usize })?;
        candidate = candidate.push(bit);
        if let Some(sym) = table.symbol(&candidate) {
            out.push(sym);
            candidate = Code::default();
        } else if candidate.len >= table.max_len() {
            return Err(CorruptError::UnknownCode { position });
        }
    }
    if !candidate.is_empty() {
        return Err(CorruptError::IncompleteCode {
            bits: candidate.len as usize,
        });
    }
    if out.len() as u64 != expected {
        return Err(CorruptError::LengthMismatch {
            expected,
            actual: out.len() as u64,
        });
    }
    debug!(
        "Decoded {} payload bits into {} bytes, reader stopped at {}.",
        payload,
        out.len(),
        br.loc()
    );
    Ok(out)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tools::freq_count::freqs;

    fn code_strings(table: &CodeTable, syms: &[u8]) -> Vec<String> {
        syms.iter().map(|&s| table.code(s).to_string()).collect()
    }

    #[test]
    fn empty_tree_test() {
        assert!(build_tree(&FreqTable::new()).is_none());
        let table = CodeTable::from_freqs(&FreqTable::new());
        assert!(table.is_empty());
        assert_eq!(table.max_len(), 0);
    }

    #[test]
    fn single_symbol_test() {
        let table = CodeTable::from_freqs(&freqs(b"zzzz"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.code(b'z').to_string(), "0");
        assert_eq!(table.symbol(&Code::default().push(false)), Some(b'z'));
    }

    #[test]
    fn two_symbol_test() {
        // {0:3, 1:1}: the lighter symbol is popped first and goes left
        let table = CodeTable::from_freqs(&freqs(&[0, 0, 0, 1]));
        assert_eq!(code_strings(&table, &[0, 1]), vec!["1", "0"]);
    }

    #[test]
    fn tie_break_test() {
        // Equal weights merge in symbol order
        let table = CodeTable::from_freqs(&freqs(b"abcd"));
        assert_eq!(
            code_strings(&table, b"abcd"),
            vec!["00", "01", "10", "11"]
        );
    }

    #[test]
    fn merged_node_tie_test() {
        // a:1 b:1 merge into weight 2, which ties with c:2. c is older so it is popped first.
        let table = CodeTable::from_freqs(&freqs(b"abcc"));
        assert_eq!(code_strings(&table, b"abc"), vec!["10", "11", "0"]);
    }

    #[test]
    fn node_count_test() {
        let data = "the quick brown fox jumps over the lazy dog".as_bytes();
        let table = freqs(data);
        let root = build_tree(&table).expect("non-empty table");
        assert_eq!(root.count(), 2 * table.symbols() - 1);
        assert_eq!(root.weight, data.len() as u64);
    }

    #[test]
    fn rebuild_is_identical_test() {
        let data = "mississippi river banks".as_bytes();
        let table = freqs(data);
        let rebuilt = FreqTable::from_bytes(&table.to_bytes()).expect("valid table");
        assert_eq!(build_tree(&table), build_tree(&rebuilt));
    }

    #[test]
    fn prefix_free_test() {
        let data = (0..=255_u8)
            .flat_map(|b| std::iter::repeat(b).take(b as usize % 7 + 1))
            .collect::<Vec<u8>>();
        let table = CodeTable::from_freqs(&freqs(&data));
        let codes = (0..=255_u8)
            .map(|s| table.code(s).to_string())
            .collect::<Vec<_>>();
        for (i, a) in codes.iter().enumerate() {
            assert!(!a.is_empty());
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn encode_literal_test() {
        // 1 -> "0", 0 -> "1": bits 1110, four padding bits
        let data = [0, 0, 0, 1];
        let body = huf_encode(&data, &freqs(&data));
        assert_eq!(body, vec![4, 0b1110_0000]);
    }

    #[test]
    fn encode_aligned_test() {
        // Eight one-bit codes fill a byte exactly, so no padding
        let data = [7_u8; 8];
        let body = huf_encode(&data, &freqs(&data));
        assert_eq!(body, vec![0, 0]);
        assert_eq!(huf_decode(&body, &freqs(&data)), Ok(data.to_vec()));
    }

    #[test]
    fn encode_empty_test() {
        assert!(huf_encode(&[], &FreqTable::new()).is_empty());
        assert_eq!(huf_decode(&[], &FreqTable::new()), Ok(vec![]));
    }

    #[test]
    fn decode_test() {
        let data = "abracadabra, said the wizard".as_bytes();
        let table = freqs(data);
        let body = huf_encode(data, &table);
        assert_eq!(huf_decode(&body, &table), Ok(data.to_vec()));
    }

    #[test]
    fn long_code_test() {
        // Fibonacci weights make a maximally deep tree, with codes longer than 24 bits
        let mut data = Vec::new();
        let (mut a, mut b) = (1_usize, 1_usize);
        for sym in 0..28_u8 {
            data.extend(std::iter::repeat(sym).take(a));
            let next = a + b;
            a = b;
            b = next;
        }
        let table = freqs(&data);
        assert!(CodeTable::from_freqs(&table).max_len() > 24);
        let body = huf_encode(&data, &table);
        assert_eq!(huf_decode(&body, &table), Ok(data));
    }

    #[test]
    fn missing_body_test() {
        assert_eq!(
            huf_decode(&[], &freqs(b"abc")),
            Err(CorruptError::LengthMismatch {
                expected: 3,
                actual: 0
            })
        );
    }

    #[test]
    fn incomplete_code_test() {
        // Codes are a=00 b=01 c=10 d=11. Three payload bits leave one dangling.
        let table = freqs(b"abcd");
        assert_eq!(
            huf_decode(&[5, 0b0001_0000], &table),
            Err(CorruptError::IncompleteCode { bits: 1 })
        );
    }

    #[test]
    fn unknown_code_test() {
        let table = FreqTable::new();
        assert_eq!(
            huf_decode(&[0, 0xff], &table),
            Err(CorruptError::UnknownCode { position: 0 })
        );
    }

    #[test]
    fn length_mismatch_test() {
        let data = [0, 0, 0, 1];
        let table = freqs(&data);
        // One extra "0" bit decodes to an extra symbol 1
        assert_eq!(
            huf_decode(&[3, 0b1110_0000], &table),
            Err(CorruptError::LengthMismatch {
                expected: 4,
                actual: 5
            })
        );
    }
}
