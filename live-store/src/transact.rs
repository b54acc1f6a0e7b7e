use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One write operation on a single record.
///
/// Record ids are chosen by the caller (the backend never allocates ids);
/// `attrs` never carries the id, the backend materializes it into the
/// stored record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum TxOp {
    Create {
        entity: String,
        id: String,
        attrs: Map<String, Value>,
    },
    Update {
        entity: String,
        id: String,
        attrs: Map<String, Value>,
    },
    Delete {
        entity: String,
        id: String,
    },
}

impl TxOp {
    pub fn create(entity: impl Into<String>, id: impl Into<String>, attrs: Map<String, Value>) -> Self {
        TxOp::Create {
            entity: entity.into(),
            id: id.into(),
            attrs,
        }
    }

    pub fn update(entity: impl Into<String>, id: impl Into<String>, attrs: Map<String, Value>) -> Self {
        TxOp::Update {
            entity: entity.into(),
            id: id.into(),
            attrs,
        }
    }

    pub fn delete(entity: impl Into<String>, id: impl Into<String>) -> Self {
        TxOp::Delete {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn entity(&self) -> &str {
        match self {
            TxOp::Create { entity, .. } | TxOp::Update { entity, .. } | TxOp::Delete { entity, .. } => {
                entity
            }
        }
    }

    pub fn record_id(&self) -> &str {
        match self {
            TxOp::Create { id, .. } | TxOp::Update { id, .. } | TxOp::Delete { id, .. } => id,
        }
    }
}

/// An atomic batch of write operations.
///
/// The backend applies the whole batch or none of it; no observer sees an
/// intermediate state between two operations of one batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TxBatch {
    /// ULID of this batch
    pub batch_id: String,
    pub ops: Vec<TxOp>,
}

impl TxBatch {
    /// Create an empty batch with a fresh ULID
    pub fn new() -> Self {
        Self {
            batch_id: ulid::Ulid::new().to_string(),
            ops: Vec::new(),
        }
    }

    pub fn with_ops(ops: Vec<TxOp>) -> Self {
        let mut batch = Self::new();
        batch.ops = ops;
        batch
    }

    pub fn push(&mut self, op: TxOp) {
        self.ops.push(op);
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl Default for TxBatch {
    fn default() -> Self {
        Self::new()
    }
}
