// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary persistence for the index triple: inverted index, document
//! lengths, and IDF table.
//!
//! Layout: a fixed-size header (magic, version, counts, section lengths)
//! that is the single source of truth for where each section starts,
//! followed by a doc_id string table, a document-lengths section, a
//! term-major postings section, and a CRC32 footer over everything before
//! it. `tf_idf`/`idf` values are stored as raw little-endian `f64` bytes so
//! a round-trip reproduces the exact bit pattern.

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::types::{
    DocumentLengths, FieldLengths, IdfTable, InvertedIndex, Posting, PostingsList, SearchIndex,
};

const MAGIC: [u8; 4] = *b"FSIX";
const VERSION: u32 = 1;
const HEADER_LEN: usize = 4 + 4 + 4 + 4 + 4 + 4 + 4; // magic + version + 3 counts + 3 section lengths
const MAX_VARINT_BYTES: usize = 10; // enough for a u64

fn encode_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let mut byte = (value & 0x7F) as u8;
        value >>= 7;
        if value != 0 {
            byte |= 0x80;
        }
        out.push(byte);
        if value == 0 {
            break;
        }
    }
}

fn decode_varint(bytes: &[u8], cursor: &mut usize) -> Result<u64, StoreError> {
    let mut result: u64 = 0;
    let mut shift = 0u32;
    for i in 0..MAX_VARINT_BYTES {
        let byte = *bytes.get(*cursor + i).ok_or(StoreError::Truncated {
            expected: *cursor + i + 1,
            got: bytes.len(),
        })?;
        result |= ((byte & 0x7F) as u64) << shift;
        if byte & 0x80 == 0 {
            *cursor += i + 1;
            return Ok(result);
        }
        shift += 7;
    }
    Err(StoreError::Truncated {
        expected: *cursor + MAX_VARINT_BYTES,
        got: bytes.len(),
    })
}

fn encode_string(s: &str, out: &mut Vec<u8>) {
    encode_varint(s.len() as u64, out);
    out.extend_from_slice(s.as_bytes());
}

fn decode_string(bytes: &[u8], cursor: &mut usize) -> Result<String, StoreError> {
    let len = decode_varint(bytes, cursor)? as usize;
    let end = *cursor + len;
    let slice = bytes.get(*cursor..end).ok_or(StoreError::Truncated {
        expected: end,
        got: bytes.len(),
    })?;
    let s = std::str::from_utf8(slice).map_err(|_| StoreError::InvalidUtf8)?.to_string();
    *cursor = end;
    Ok(s)
}

fn encode_positions(positions: &[u32], out: &mut Vec<u8>) {
    encode_varint(positions.len() as u64, out);
    let mut prev = 0u32;
    for &p in positions {
        encode_varint((p - prev) as u64, out);
        prev = p;
    }
}

fn decode_positions(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u32>, StoreError> {
    let count = decode_varint(bytes, cursor)? as usize;
    let mut positions = Vec::with_capacity(count);
    let mut prev = 0u32;
    for _ in 0..count {
        let delta = decode_varint(bytes, cursor)? as u32;
        prev += delta;
        positions.push(prev);
    }
    Ok(positions)
}

fn encode_f64(value: f64, out: &mut Vec<u8>) {
    out.extend_from_slice(&value.to_le_bytes());
}

fn decode_f64(bytes: &[u8], cursor: &mut usize) -> Result<f64, StoreError> {
    let slice = bytes
        .get(*cursor..*cursor + 8)
        .ok_or(StoreError::Truncated {
            expected: *cursor + 8,
            got: bytes.len(),
        })?;
    let mut buf = [0u8; 8];
    buf.copy_from_slice(slice);
    *cursor += 8;
    Ok(f64::from_le_bytes(buf))
}

/// Encode a [`SearchIndex`] into this crate's on-disk format.
pub fn encode_index(index: &SearchIndex) -> Vec<u8> {
    // doc_id -> position in the doc table, assigned in sorted order.
    let doc_order: Vec<&String> = index.document_lengths.keys().collect();
    let doc_index: BTreeMap<&str, u32> = doc_order
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i as u32))
        .collect();

    let mut doc_table = Vec::new();
    for doc_id in &doc_order {
        encode_string(doc_id, &mut doc_table);
    }

    let mut lengths_section = Vec::new();
    for doc_id in &doc_order {
        let lengths = &index.document_lengths[*doc_id];
        encode_varint(lengths.title_len as u64, &mut lengths_section);
        encode_varint(lengths.body_len as u64, &mut lengths_section);
    }

    let mut postings_section = Vec::new();
    for (term, postings) in &index.inverted_index {
        encode_string(term, &mut postings_section);
        encode_f64(index.idf_table.get(term).copied().unwrap_or(0.0), &mut postings_section);
        encode_varint(postings.len() as u64, &mut postings_section);
        for (doc_id, posting) in postings {
            let idx = doc_index[doc_id.as_str()];
            encode_varint(idx as u64, &mut postings_section);
            encode_varint(posting.title_tf as u64, &mut postings_section);
            encode_varint(posting.body_tf as u64, &mut postings_section);
            encode_positions(&posting.title_positions, &mut postings_section);
            encode_positions(&posting.body_positions, &mut postings_section);
            encode_f64(posting.title_tf_idf, &mut postings_section);
            encode_f64(posting.body_tf_idf, &mut postings_section);
        }
    }

    let mut out = Vec::with_capacity(HEADER_LEN + doc_table.len() + lengths_section.len() + postings_section.len() + 4);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(doc_order.len() as u32).to_le_bytes());
    out.extend_from_slice(&(index.inverted_index.len() as u32).to_le_bytes());
    out.extend_from_slice(&(doc_table.len() as u32).to_le_bytes());
    out.extend_from_slice(&(lengths_section.len() as u32).to_le_bytes());
    out.extend_from_slice(&(postings_section.len() as u32).to_le_bytes());
    out.extend_from_slice(&doc_table);
    out.extend_from_slice(&lengths_section);
    out.extend_from_slice(&postings_section);

    let checksum = crc32fast::hash(&out);
    out.extend_from_slice(&checksum.to_le_bytes());
    out
}

/// Read just the format version out of a store header, without decoding the
/// rest of the index or checking its CRC32 footer. Used by `inspect`, which
/// reports the version alongside counts that do require a full decode.
pub fn read_format_version(bytes: &[u8]) -> Result<u32, StoreError> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(StoreError::Truncated {
            expected: HEADER_LEN + 4,
            got: bytes.len(),
        });
    }
    if bytes[0..4] != MAGIC {
        return Err(StoreError::BadMagic);
    }
    Ok(u32::from_le_bytes(bytes[4..8].try_into().unwrap()))
}

/// Decode a [`SearchIndex`] previously written by [`encode_index`].
pub fn decode_index(bytes: &[u8]) -> Result<SearchIndex, StoreError> {
    if bytes.len() < HEADER_LEN + 4 {
        return Err(StoreError::Truncated {
            expected: HEADER_LEN + 4,
            got: bytes.len(),
        });
    }

    let body = &bytes[..bytes.len() - 4];
    let footer = &bytes[bytes.len() - 4..];

    if body[0..4] != MAGIC {
        return Err(StoreError::BadMagic);
    }
    let version = u32::from_le_bytes(body[4..8].try_into().unwrap());
    if version != VERSION {
        return Err(StoreError::UnsupportedVersion(version));
    }

    let expected_checksum = u32::from_le_bytes(footer.try_into().unwrap());
    let actual_checksum = crc32fast::hash(body);
    if expected_checksum != actual_checksum {
        return Err(StoreError::ChecksumMismatch {
            expected: expected_checksum,
            got: actual_checksum,
        });
    }
    let doc_count = u32::from_le_bytes(body[8..12].try_into().unwrap()) as usize;
    let term_count = u32::from_le_bytes(body[12..16].try_into().unwrap()) as usize;
    let doc_table_len = u32::from_le_bytes(body[16..20].try_into().unwrap()) as usize;
    let lengths_len = u32::from_le_bytes(body[20..24].try_into().unwrap()) as usize;
    let postings_len = u32::from_le_bytes(body[24..28].try_into().unwrap()) as usize;

    let doc_table_start = HEADER_LEN;
    let lengths_start = doc_table_start + doc_table_len;
    let postings_start = lengths_start + lengths_len;
    let postings_end = postings_start + postings_len;

    if body.len() < postings_end {
        return Err(StoreError::Truncated {
            expected: postings_end,
            got: body.len(),
        });
    }

    let mut cursor = doc_table_start;
    let mut doc_ids = Vec::with_capacity(doc_count);
    for _ in 0..doc_count {
        doc_ids.push(decode_string(body, &mut cursor)?);
    }
    debug_assert_eq!(cursor, lengths_start);

    let mut document_lengths = DocumentLengths::new();
    let mut cursor = lengths_start;
    for doc_id in &doc_ids {
        let title_len = decode_varint(body, &mut cursor)? as u32;
        let body_len = decode_varint(body, &mut cursor)? as u32;
        document_lengths.insert(doc_id.clone(), FieldLengths { title_len, body_len });
    }
    debug_assert_eq!(cursor, postings_start);

    let mut inverted_index = InvertedIndex::new();
    let mut idf_table = IdfTable::new();
    let mut cursor = postings_start;
    for _ in 0..term_count {
        let term = decode_string(body, &mut cursor)?;
        let idf = decode_f64(body, &mut cursor)?;
        idf_table.insert(term.clone(), idf);

        let posting_count = decode_varint(body, &mut cursor)? as usize;
        let mut postings = PostingsList::new();
        for _ in 0..posting_count {
            let doc_index = decode_varint(body, &mut cursor)? as usize;
            let doc_id = doc_ids.get(doc_index).ok_or(StoreError::Truncated {
                expected: doc_index + 1,
                got: doc_ids.len(),
            })?;
            let title_tf = decode_varint(body, &mut cursor)? as u32;
            let body_tf = decode_varint(body, &mut cursor)? as u32;
            let title_positions = decode_positions(body, &mut cursor)?;
            let body_positions = decode_positions(body, &mut cursor)?;
            let title_tf_idf = decode_f64(body, &mut cursor)?;
            let body_tf_idf = decode_f64(body, &mut cursor)?;
            postings.insert(
                doc_id.clone(),
                Posting {
                    title_tf,
                    body_tf,
                    title_positions,
                    body_positions,
                    title_tf_idf,
                    body_tf_idf,
                },
            );
        }
        inverted_index.insert(term, postings);
    }

    Ok(SearchIndex {
        inverted_index,
        document_lengths,
        idf_table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::build_index;
    use crate::types::DocumentRecord;

    fn doc(url: &str, title: &str, body: &str) -> DocumentRecord {
        DocumentRecord {
            url: url.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    fn sample_index() -> SearchIndex {
        let mut docs = BTreeMap::new();
        docs.insert("d1".into(), doc("u1", "search engine", "a persian نمونه body"));
        docs.insert("d2".into(), doc("u2", "engine", "search optimization"));
        build_index(&docs)
    }

    #[test]
    fn round_trip_preserves_everything() {
        let index = sample_index();
        let bytes = encode_index(&index);
        let decoded = decode_index(&bytes).unwrap();
        assert_eq!(index, decoded);
    }

    #[test]
    fn round_trip_preserves_float_bit_patterns() {
        let index = sample_index();
        let bytes = encode_index(&index);
        let decoded = decode_index(&bytes).unwrap();
        for (term, idf) in &index.idf_table {
            assert_eq!(idf.to_bits(), decoded.idf_table[term].to_bits());
        }
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = encode_index(&sample_index());
        bytes[0] = b'X';
        assert!(matches!(decode_index(&bytes), Err(StoreError::BadMagic)));
    }

    #[test]
    fn rejects_truncated_file() {
        let bytes = encode_index(&sample_index());
        let truncated = &bytes[..bytes.len() / 2];
        // A truncated file can't have a matching footer checksum either,
        // so any decode error is an acceptable rejection here - the
        // invariant under test is "never returns a partial index".
        assert!(decode_index(truncated).is_err());
    }

    #[test]
    fn rejects_flipped_checksum_byte() {
        let mut bytes = encode_index(&sample_index());
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert!(matches!(
            decode_index(&bytes),
            Err(StoreError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn read_format_version_matches_encoded_version() {
        let bytes = encode_index(&sample_index());
        assert_eq!(read_format_version(&bytes).unwrap(), VERSION);
    }

    #[test]
    fn read_format_version_rejects_bad_magic() {
        let mut bytes = encode_index(&sample_index());
        bytes[0] = b'X';
        assert!(matches!(
            read_format_version(&bytes),
            Err(StoreError::BadMagic)
        ));
    }

    #[test]
    fn empty_index_round_trips() {
        let index = build_index(&BTreeMap::new());
        let bytes = encode_index(&index);
        let decoded = decode_index(&bytes).unwrap();
        assert_eq!(index, decoded);
    }
}
