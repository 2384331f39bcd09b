//! Minimal [Recursive Length Prefix] encoder.
//!
//! Only what address derivation needs: byte strings, unsigned integers and
//! lists of already encoded items.
//!
//! [Recursive Length Prefix]: https://ethereum.org/en/developers/docs/data-structures-and-encoding/rlp/

/// First prefix byte of a string header.
const STRING_OFFSET: u8 = 0x80;
/// First prefix byte of a list header.
const LIST_OFFSET: u8 = 0xc0;
/// Longest payload whose length fits in the prefix byte itself.
const SHORT_PAYLOAD: usize = 55;

/// Appends `bytes` encoded as an RLP string to `out`.
///
/// A single byte below `0x80` is its own encoding.
pub fn encode_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    if let [byte] = bytes {
        if *byte < STRING_OFFSET {
            out.push(*byte);
            return;
        }
    }
    encode_header(out, STRING_OFFSET, bytes.len());
    out.extend_from_slice(bytes);
}

/// Appends `value` encoded as an RLP integer to `out`.
///
/// Integers are strings of their minimal big-endian bytes, so zero is the
/// empty string.
pub fn encode_u64(out: &mut Vec<u8>, value: u64) {
    encode_bytes(out, trim_leading_zeros(&value.to_be_bytes()));
}

/// Appends the concatenation of already encoded items as an RLP list to
/// `out`.
pub fn encode_list(out: &mut Vec<u8>, payload: &[u8]) {
    encode_header(out, LIST_OFFSET, payload.len());
    out.extend_from_slice(payload);
}

#[allow(clippy::cast_possible_truncation)]
fn encode_header(out: &mut Vec<u8>, offset: u8, len: usize) {
    if len <= SHORT_PAYLOAD {
        // Fits: `len` is at most 55.
        out.push(offset + len as u8);
        return;
    }

    let len_bytes = (len as u64).to_be_bytes();
    let len_bytes = trim_leading_zeros(&len_bytes);
    // At most 8 length bytes.
    out.push(offset + SHORT_PAYLOAD as u8 + len_bytes.len() as u8);
    out.extend_from_slice(len_bytes);
}

fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
