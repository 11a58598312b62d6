// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: Encode and decode VSS native node records without std dependencies.
// Author: Lukas Bower

//! Encode/decode helpers for single node records.
//!
//! A record is the common header, the raw name and description bytes and
//! the payload selected by the node type. Children are not part of a record;
//! they follow as separate records in pre-order.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::str;

use crate::types::*;

/// Encode/decode helper for node records.
pub struct Codec;

impl Codec {
    /// Append the wire representation of `record` to `out`.
    ///
    /// Nothing is appended when the record fails validation.
    pub fn encode_record(&self, record: RecordRef<'_>, out: &mut Vec<u8>) -> Result<(), CodecError> {
        validate_name(record.name)?;
        if record.node_type.variant() != record.payload.variant() {
            return Err(CodecError::PayloadMismatch(record.node_type));
        }
        let mut buffer = Vec::with_capacity(HEADER_LEN + record.name.len() + record.description.len());
        put_len(&mut buffer, record.name.len())?;
        put_len(&mut buffer, record.description.len())?;
        put_i32(&mut buffer, record.node_type.code());
        put_len(&mut buffer, record.child_count)?;
        buffer.extend_from_slice(record.name.as_bytes());
        put_text(&mut buffer, record.description)?;
        match record.payload {
            Payload::RuleBranch(rule) => {
                put_i32(&mut buffer, rule.child_type_len);
                put_records(&mut buffer, &rule.properties)?;
            }
            Payload::Element(object) => {
                put_i32(&mut buffer, object.object_type().code());
                match object {
                    UniqueObject::MediaCollection(collection) => {
                        put_records(&mut buffer, &collection.items)?;
                    }
                    UniqueObject::MediaItem(_) => {}
                }
            }
            Payload::Branch(branch) => {
                put_i32(&mut buffer, branch.datatype);
                put_i32(&mut buffer, branch.min);
                put_i32(&mut buffer, branch.max);
                put_optional_text(&mut buffer, branch.unit.as_deref())?;
                put_records(&mut buffer, &branch.enumeration)?;
                put_optional_text(&mut buffer, branch.function.as_deref())?;
            }
        }
        out.extend_from_slice(&buffer);
        Ok(())
    }

    /// Decode one record from the front of `bytes`.
    ///
    /// Returns the record and the number of bytes it occupied.
    pub fn decode_record(&self, bytes: &[u8]) -> Result<(NodeRecord, usize), CodecError> {
        let mut cursor = Cursor::new(bytes);
        let header = read_header(&mut cursor)?;
        let name = read_text(&mut cursor, header.name_len() as usize)?;
        validate_name(&name)?;
        let description = read_text(&mut cursor, header.description_len() as usize)?;
        let payload = match header.node_type().variant() {
            Variant::RuleBranch => {
                let child_type_len = read_i32(&mut cursor)?;
                let count = read_len(&mut cursor)?;
                let properties = read_records(&mut cursor, count)?;
                Payload::RuleBranch(RuleBranchPayload {
                    child_type_len,
                    properties,
                })
            }
            Variant::Element => {
                let object_type = ObjectType::try_from(read_i32(&mut cursor)?)?;
                let object = match object_type {
                    ObjectType::MediaCollection => {
                        let count = read_len(&mut cursor)?;
                        let items = read_records(&mut cursor, count)?;
                        UniqueObject::MediaCollection(MediaCollection { items })
                    }
                    ObjectType::MediaItem => UniqueObject::MediaItem(MediaItem),
                };
                Payload::Element(object)
            }
            Variant::Branch => {
                let datatype = read_i32(&mut cursor)?;
                let min = read_i32(&mut cursor)?;
                let max = read_i32(&mut cursor)?;
                let unit = read_optional_text(&mut cursor)?;
                let count = read_len(&mut cursor)?;
                let enumeration = read_records(&mut cursor, count)?;
                let function = read_optional_text(&mut cursor)?;
                Payload::Branch(BranchPayload {
                    datatype,
                    min,
                    max,
                    unit,
                    enumeration,
                    function,
                })
            }
        };
        let record = NodeRecord {
            node_type: header.node_type(),
            name,
            description,
            child_count: header.child_count(),
            payload,
        };
        Ok((record, cursor.position()))
    }
}

/// Encode a record using the default codec.
pub fn encode_record(record: RecordRef<'_>, out: &mut Vec<u8>) -> Result<(), CodecError> {
    Codec.encode_record(record, out)
}

/// Decode a record using the default codec.
pub fn decode_record(bytes: &[u8]) -> Result<(NodeRecord, usize), CodecError> {
    Codec.decode_record(bytes)
}

fn read_header(cursor: &mut Cursor<'_>) -> Result<CommonHeader, CodecError> {
    let name_len = read_len(cursor)?;
    let description_len = read_len(cursor)?;
    let node_type = NodeType::try_from(read_i32(cursor)?)?;
    let child_count = read_len(cursor)?;
    Ok(CommonHeader::new(
        name_len as u32,
        description_len as u32,
        node_type,
        child_count as u32,
    ))
}

fn read_i32(cursor: &mut Cursor<'_>) -> Result<i32, CodecError> {
    let mut buf = [0u8; 4];
    cursor.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_len(cursor: &mut Cursor<'_>) -> Result<usize, CodecError> {
    let raw = read_i32(cursor)?;
    usize::try_from(raw).map_err(|_| CodecError::InvalidLength(i64::from(raw)))
}

fn read_text(cursor: &mut Cursor<'_>, len: usize) -> Result<String, CodecError> {
    let raw = cursor.take(len)?;
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
    let text = str::from_utf8(&raw[..end]).map_err(|_| CodecError::InvalidUtf8)?;
    Ok(text.to_owned())
}

fn read_optional_text(cursor: &mut Cursor<'_>) -> Result<Option<String>, CodecError> {
    let len = read_len(cursor)?;
    if len == 0 {
        return Ok(None);
    }
    let text = read_text(cursor, len)?;
    Ok(if text.is_empty() { None } else { Some(text) })
}

fn read_records<const N: usize>(
    cursor: &mut Cursor<'_>,
    count: usize,
) -> Result<Vec<FixedRecord<N>>, CodecError> {
    let total = count.checked_mul(N).ok_or(CodecError::Truncated)?;
    if total > cursor.remaining() {
        return Err(CodecError::Truncated);
    }
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let mut bytes = [0u8; N];
        cursor.read_exact(&mut bytes)?;
        records.push(FixedRecord::from_bytes(bytes));
    }
    Ok(records)
}

fn put_i32(buffer: &mut Vec<u8>, value: i32) {
    buffer.extend_from_slice(&value.to_le_bytes());
}

fn put_len(buffer: &mut Vec<u8>, len: usize) -> Result<(), CodecError> {
    let value = i32::try_from(len).map_err(|_| CodecError::InvalidLength(len as i64))?;
    put_i32(buffer, value);
    Ok(())
}

fn put_text(buffer: &mut Vec<u8>, value: &str) -> Result<(), CodecError> {
    if value.contains('\0') {
        return Err(CodecError::EmbeddedNul);
    }
    buffer.extend_from_slice(value.as_bytes());
    Ok(())
}

fn put_optional_text(buffer: &mut Vec<u8>, value: Option<&str>) -> Result<(), CodecError> {
    let text = value.unwrap_or_default();
    put_len(buffer, text.len())?;
    put_text(buffer, text)
}

fn put_records<const N: usize>(
    buffer: &mut Vec<u8>,
    records: &[FixedRecord<N>],
) -> Result<(), CodecError> {
    put_len(buffer, records.len())?;
    for record in records {
        buffer.extend_from_slice(record.as_bytes());
    }
    Ok(())
}

struct Cursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::Truncated);
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    fn read_exact(&mut self, out: &mut [u8]) -> Result<(), CodecError> {
        let slice = self.take(out.len())?;
        out.copy_from_slice(slice);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn sensor(name: &str) -> NodeRecord {
        NodeRecord {
            node_type: NodeType::Sensor,
            name: name.to_string(),
            description: "Vehicle speed.".to_string(),
            child_count: 0,
            payload: Payload::Branch(BranchPayload {
                datatype: Datatype::Float.code(),
                min: 0,
                max: 250,
                unit: Some("km/h".to_string()),
                enumeration: vec![EnumElement::from_text("LOW").expect("enum text")],
                function: None,
            }),
        }
    }

    fn encode(record: &NodeRecord) -> Vec<u8> {
        let mut out = Vec::new();
        Codec.encode_record(record.as_ref(), &mut out).expect("encode record");
        out
    }

    #[test]
    fn header_precedes_name_and_description() {
        let bytes = encode(&sensor("Speed"));
        assert_eq!(&bytes[0..4], &5i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &14i32.to_le_bytes());
        assert_eq!(&bytes[8..12], &NodeType::Sensor.code().to_le_bytes());
        assert_eq!(&bytes[12..16], &0i32.to_le_bytes());
        assert_eq!(&bytes[16..21], b"Speed");
    }

    #[test]
    fn decode_reports_consumed_length() {
        let mut bytes = encode(&sensor("Speed"));
        let len = bytes.len();
        bytes.extend_from_slice(&[0xAA; 7]);
        let (record, consumed) = Codec.decode_record(&bytes).expect("decode record");
        assert_eq!(consumed, len);
        assert_eq!(record, sensor("Speed"));
    }

    #[test]
    fn reject_unknown_node_type() {
        let mut bytes = encode(&sensor("Speed"));
        bytes[8..12].copy_from_slice(&42i32.to_le_bytes());
        assert_eq!(
            Codec.decode_record(&bytes),
            Err(CodecError::UnknownVariant(42))
        );
    }

    #[test]
    fn reject_unknown_object_type() {
        let record = NodeRecord {
            node_type: NodeType::Element,
            name: "Playlist".to_string(),
            description: String::new(),
            child_count: 0,
            payload: Payload::Element(UniqueObject::MediaItem(MediaItem)),
        };
        let mut bytes = encode(&record);
        let len = bytes.len();
        bytes[len - 4..].copy_from_slice(&7i32.to_le_bytes());
        assert_eq!(
            Codec.decode_record(&bytes),
            Err(CodecError::UnknownObjectType(7))
        );
    }

    #[test]
    fn detect_truncated_records() {
        let bytes = encode(&sensor("Speed"));
        for cut in 0..bytes.len() {
            assert!(Codec.decode_record(&bytes[..cut]).is_err(), "cut at {cut}");
        }
    }

    #[test]
    fn reject_negative_lengths() {
        let mut bytes = encode(&sensor("Speed"));
        bytes[4..8].copy_from_slice(&(-1i32).to_le_bytes());
        assert_eq!(
            Codec.decode_record(&bytes),
            Err(CodecError::InvalidLength(-1))
        );
    }

    #[test]
    fn huge_record_counts_fail_before_allocating() {
        let mut record = sensor("Speed");
        if let Payload::Branch(branch) = &mut record.payload {
            branch.enumeration.clear();
            branch.unit = None;
        }
        let mut bytes = encode(&record);
        // datatype, min, max, unit length, then the enumeration count
        let count_at = 16 + 5 + 14 + 16;
        bytes[count_at..count_at + 4].copy_from_slice(&i32::MAX.to_le_bytes());
        assert_eq!(Codec.decode_record(&bytes), Err(CodecError::Truncated));
    }

    #[test]
    fn detect_invalid_utf8() {
        let mut bytes = encode(&sensor("Speed"));
        bytes[16] = 0xfe;
        bytes[17] = 0xff;
        assert_eq!(Codec.decode_record(&bytes), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn names_are_cut_at_nul() {
        let mut bytes = encode(&sensor("Speed"));
        bytes[19] = 0;
        let (record, _) = Codec.decode_record(&bytes).expect("decode record");
        assert_eq!(record.name, "Spe");
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut out = Vec::new();
        let err = Codec.encode_record(sensor("").as_ref(), &mut out);
        assert_eq!(err, Err(CodecError::InvalidName));
        assert!(out.is_empty());
    }

    #[test]
    fn dotted_names_are_rejected_both_ways() {
        let mut out = Vec::new();
        let err = Codec.encode_record(sensor("Cabin.Door").as_ref(), &mut out);
        assert_eq!(err, Err(CodecError::InvalidName));
        assert!(out.is_empty());

        let mut bytes = encode(&sensor("Speed"));
        bytes[HEADER_LEN + 1] = b'.';
        assert_eq!(Codec.decode_record(&bytes), Err(CodecError::InvalidName));
    }

    #[test]
    fn payload_must_match_node_type() {
        let mut record = sensor("Speed");
        record.node_type = NodeType::RBranch;
        let mut out = Vec::new();
        assert_eq!(
            Codec.encode_record(record.as_ref(), &mut out),
            Err(CodecError::PayloadMismatch(NodeType::RBranch))
        );
    }
}
