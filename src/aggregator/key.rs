//! Group-key method dispatch (spec §4.B, Design Notes §9).
//!
//! Roughly thirty ClickHouse-style hash-table specializations collapse here
//! into one closed `MethodKind` tag plus one `Key` enum, matched over rather
//! than monomorphized per type. [`choose_method`] is the single place that
//! decides, from declared key column types, which tag a given
//! [`super::params::AggregatorParams`] dispatches through.

use super::block::Column;
use super::params::KeyColumnType;

/// Which encoding a group-by clause's keys dispatch through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// No group-by clause: a single implicit key.
    WithoutKey,
    /// A single fixed-width key column (or several packed into one fixed
    /// width), stored inline without allocation.
    Fixed8,
    Fixed16,
    Fixed32,
    Fixed64,
    Fixed128,
    /// A single string/bytes key column, or one that can't be packed.
    Str,
    /// Multiple heterogeneous key columns, concatenated into an opaque byte
    /// string ("serialized" method).
    Serialized,
}

/// Picks the narrowest `MethodKind` that can represent the declared key
/// columns, matching the original's "smallest fixed-width type that fits,
/// else string, else serialized" decision order.
pub fn choose_method(key_types: &[KeyColumnType]) -> MethodKind {
    if key_types.is_empty() {
        return MethodKind::WithoutKey;
    }

    if key_types.len() == 1 {
        return match key_types[0] {
            KeyColumnType::Int8 => MethodKind::Fixed8,
            KeyColumnType::Int16 => MethodKind::Fixed16,
            KeyColumnType::Int32 => MethodKind::Fixed32,
            KeyColumnType::Int64 => MethodKind::Fixed64,
            KeyColumnType::Str | KeyColumnType::Bytes => MethodKind::Str,
        };
    }

    let total_width: Option<usize> = key_types.iter().try_fold(0usize, |acc, t| {
        t.fixed_width().map(|w| acc + w)
    });

    match total_width {
        Some(w) if w <= 8 => MethodKind::Fixed64,
        Some(w) if w <= 16 => MethodKind::Fixed128,
        _ => MethodKind::Serialized,
    }
}

/// A decoded group key, tagged by the method that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    None,
    Fixed8([u8; 1]),
    Fixed16([u8; 2]),
    Fixed32([u8; 4]),
    Fixed64([u8; 8]),
    Fixed128([u8; 16]),
    Str(Box<str>),
    Bytes(Box<[u8]>),
    Serialized(Box<[u8]>),
}

impl Key {
    /// Which two-level bucket (0..[`super::variants::NUM_BUCKETS`]) this key
    /// hashes to.
    pub fn bucket(&self, num_buckets: usize) -> usize {
        use std::hash::{Hash, Hasher};
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.hash(&mut hasher);
        (hasher.finish() as usize) % num_buckets
    }
}

/// Builds the [`Key`] for `row` across the declared key columns, per the
/// method chosen by [`choose_method`].
pub fn encode_key(method: MethodKind, key_columns: &[&Column], row: usize) -> Key {
    match method {
        MethodKind::WithoutKey => Key::None,
        MethodKind::Fixed8 | MethodKind::Fixed16 | MethodKind::Fixed32 | MethodKind::Fixed64
            if key_columns.len() == 1 =>
        {
            encode_fixed_single(method, key_columns[0], row)
        }
        MethodKind::Str if key_columns.len() == 1 => encode_str_single(key_columns[0], row),
        MethodKind::Fixed64 | MethodKind::Fixed128 => encode_fixed_packed(method, key_columns, row),
        _ => encode_serialized(key_columns, row),
    }
}

fn encode_fixed_single(method: MethodKind, col: &Column, row: usize) -> Key {
    let v = col.value_at(row).as_i64();
    match method {
        MethodKind::Fixed8 => Key::Fixed8([v as u8]),
        MethodKind::Fixed16 => Key::Fixed16((v as u16).to_le_bytes()),
        MethodKind::Fixed32 => Key::Fixed32((v as u32).to_le_bytes()),
        MethodKind::Fixed64 => Key::Fixed64(v.to_le_bytes()),
        _ => unreachable!("encode_fixed_single only called for fixed-width tags"),
    }
}

fn encode_str_single(col: &Column, row: usize) -> Key {
    match col {
        Column::Str(v) => Key::Str(v[row].as_str().into()),
        Column::Bytes(v) => Key::Bytes(v[row].as_slice().into()),
        _ => Key::Str(col.value_at(row).as_i64().to_string().into()),
    }
}

fn encode_fixed_packed(method: MethodKind, key_columns: &[&Column], row: usize) -> Key {
    let mut bytes = Vec::new();
    for col in key_columns {
        bytes.extend_from_slice(&col.value_at(row).as_i64().to_le_bytes());
    }
    match method {
        MethodKind::Fixed64 => {
            bytes.resize(8, 0);
            Key::Fixed64(bytes[..8].try_into().expect("resized to 8"))
        }
        MethodKind::Fixed128 => {
            bytes.resize(16, 0);
            Key::Fixed128(bytes[..16].try_into().expect("resized to 16"))
        }
        _ => unreachable!("encode_fixed_packed only called for packed fixed tags"),
    }
}

fn encode_serialized(key_columns: &[&Column], row: usize) -> Key {
    let mut bytes = Vec::new();
    for col in key_columns {
        match col.value_at(row) {
            super::block::Value::Int(i) => bytes.extend_from_slice(&i.to_le_bytes()),
            super::block::Value::Float(f) => bytes.extend_from_slice(&f.to_le_bytes()),
            super::block::Value::Str(s) => {
                bytes.extend_from_slice(&(s.len() as u32).to_le_bytes());
                bytes.extend_from_slice(s.as_bytes());
            }
            super::block::Value::Bytes(b) => {
                bytes.extend_from_slice(&(b.len() as u32).to_le_bytes());
                bytes.extend_from_slice(&b);
            }
            super::block::Value::Null => bytes.push(0xFF),
        }
    }
    Key::Serialized(bytes.into_boxed_slice())
}
