//! The in-memory and on-wire record batch / output block types (spec §3, §6).

use serde::{Deserialize, Serialize};

/// A single scalar value read out of a [`Column`] for one row.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    Null,
}

impl Value {
    pub fn as_i64(&self) -> i64 {
        match self {
            Value::Int(v) => *v,
            Value::Float(v) => *v as i64,
            _ => 0,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            Value::Int(v) => *v as f64,
            Value::Float(v) => *v,
            _ => 0.0,
        }
    }
}

/// Runtime tag of a [`Column`]; also used to describe aggregate argument and
/// group-key column types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Int64,
    Float64,
    Str,
    Bytes,
}

/// A typed, immutable column of values.
///
/// Columns are plain owned vectors rather than `Arc<[T]>` slices: the engine
/// favors simplicity over avoiding a clone on the (rare) paths that need to
/// duplicate a column, matching "immutable once observed" without adding
/// shared-ownership bookkeeping nothing else in this crate needs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Column {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Str(Vec<String>),
    Bytes(Vec<Vec<u8>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Int64(v) => v.len(),
            Column::Float64(v) => v.len(),
            Column::Str(v) => v.len(),
            Column::Bytes(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_type(&self) -> ColumnType {
        match self {
            Column::Int64(_) => ColumnType::Int64,
            Column::Float64(_) => ColumnType::Float64,
            Column::Str(_) => ColumnType::Str,
            Column::Bytes(_) => ColumnType::Bytes,
        }
    }

    pub fn value_at(&self, row: usize) -> Value {
        match self {
            Column::Int64(v) => Value::Int(v[row]),
            Column::Float64(v) => Value::Float(v[row]),
            Column::Str(v) => Value::Str(v[row].clone()),
            Column::Bytes(v) => Value::Bytes(v[row].clone()),
        }
    }

    pub fn slice(&self, range: std::ops::Range<usize>) -> Column {
        match self {
            Column::Int64(v) => Column::Int64(v[range].to_vec()),
            Column::Float64(v) => Column::Float64(v[range].to_vec()),
            Column::Str(v) => Column::Str(v[range].to_vec()),
            Column::Bytes(v) => Column::Bytes(v[range].to_vec()),
        }
    }
}

/// A growable, typed output column under construction by a [`crate::aggregator::converter`].
#[derive(Clone, Debug)]
pub enum ColumnBuilder {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Str(Vec<String>),
    Bytes(Vec<Vec<u8>>),
}

impl ColumnBuilder {
    pub fn new(ty: ColumnType) -> Self {
        match ty {
            ColumnType::Int64 => ColumnBuilder::Int64(Vec::new()),
            ColumnType::Float64 => ColumnBuilder::Float64(Vec::new()),
            ColumnType::Str => ColumnBuilder::Str(Vec::new()),
            ColumnType::Bytes => ColumnBuilder::Bytes(Vec::new()),
        }
    }

    pub fn push_i64(&mut self, v: i64) {
        match self {
            ColumnBuilder::Int64(vec) => vec.push(v),
            ColumnBuilder::Float64(vec) => vec.push(v as f64),
            _ => panic!("ColumnBuilder::push_i64 on non-numeric column"),
        }
    }

    pub fn push_f64(&mut self, v: f64) {
        match self {
            ColumnBuilder::Float64(vec) => vec.push(v),
            ColumnBuilder::Int64(vec) => vec.push(v as i64),
            _ => panic!("ColumnBuilder::push_f64 on non-numeric column"),
        }
    }

    pub fn push_value(&mut self, v: Value) {
        match (self, v) {
            (ColumnBuilder::Int64(vec), Value::Int(i)) => vec.push(i),
            (ColumnBuilder::Float64(vec), Value::Float(f)) => vec.push(f),
            (ColumnBuilder::Str(vec), Value::Str(s)) => vec.push(s),
            (ColumnBuilder::Bytes(vec), Value::Bytes(b)) => vec.push(b),
            _ => panic!("ColumnBuilder::push_value type mismatch"),
        }
    }

    pub fn finish(self) -> Column {
        match self {
            ColumnBuilder::Int64(v) => Column::Int64(v),
            ColumnBuilder::Float64(v) => Column::Float64(v),
            ColumnBuilder::Str(v) => Column::Str(v),
            ColumnBuilder::Bytes(v) => Column::Bytes(v),
        }
    }
}

/// An output/intermediate record batch (spec §6 "Block format").
///
/// `bucket_num == -1` means unbucketed (single-level output or the overflow
/// row/block). Non-negative values identify the two-level bucket a block was
/// produced from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub columns: Vec<(String, Column)>,
    pub bucket_num: i32,
    pub is_overflows: bool,
}

impl Block {
    pub fn unbucketed(columns: Vec<(String, Column)>) -> Self {
        Self {
            columns,
            bucket_num: -1,
            is_overflows: false,
        }
    }

    pub fn bucketed(columns: Vec<(String, Column)>, bucket_num: i32) -> Self {
        Self {
            columns,
            bucket_num,
            is_overflows: false,
        }
    }

    pub fn overflow(columns: Vec<(String, Column)>) -> Self {
        Self {
            columns,
            bucket_num: -1,
            is_overflows: true,
        }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, c)| c.len())
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, c)| c)
    }
}
