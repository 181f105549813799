use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Value and text color of one ladder cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub value: f64,
    pub color: String,
}

impl CellData {
    #[must_use]
    pub fn new(value: f64, color: impl Into<String>) -> Self {
        Self {
            value,
            color: color.into(),
        }
    }
}

/// One data row: cells keyed by column key, in insertion order.
///
/// `ts` is an optional frame-origin timestamp in Unix epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RowRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
    #[serde(flatten)]
    pub cells: IndexMap<String, CellData>,
}

impl RowRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cell(mut self, key: impl Into<String>, value: f64, color: impl Into<String>) -> Self {
        self.cells.insert(key.into(), CellData::new(value, color));
        self
    }

    #[must_use]
    pub fn with_ts(mut self, ts_millis: i64) -> Self {
        self.ts = Some(ts_millis);
        self
    }

    #[must_use]
    pub fn cell(&self, key: &str) -> Option<&CellData> {
        self.cells.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Rows of one update plus the frame-origin timestamp.
///
/// Rows are shared, not copied, between the coordinator (which keeps them
/// for row events) and the render worker.
#[derive(Debug, Clone, PartialEq)]
pub struct LadderFrame {
    pub rows: Arc<[RowRecord]>,
    pub ts: Option<i64>,
}

impl LadderFrame {
    /// Wraps rows; the frame timestamp is taken from the first row.
    #[must_use]
    pub fn new(rows: Arc<[RowRecord]>) -> Self {
        let ts = rows.first().and_then(|row| row.ts);
        Self { rows, ts }
    }

    #[must_use]
    pub fn with_ts(mut self, ts_millis: Option<i64>) -> Self {
        self.ts = ts_millis;
        self
    }
}

impl From<Vec<RowRecord>> for LadderFrame {
    fn from(rows: Vec<RowRecord>) -> Self {
        Self::new(rows.into())
    }
}
