use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A transaction as reported by the node. Every field is kept as the node's
/// string so hex-encoded big integers are never reinterpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    #[serde(deserialize_with = "nullable_string")]
    pub block_hash: String,
    #[serde(deserialize_with = "nullable_string")]
    pub block_number: String,
    #[serde(deserialize_with = "nullable_string")]
    pub from: String,
    #[serde(deserialize_with = "nullable_string")]
    pub gas: String,
    #[serde(deserialize_with = "nullable_string")]
    pub gas_price: String,
    #[serde(deserialize_with = "nullable_string")]
    pub hash: String,
    #[serde(deserialize_with = "nullable_string")]
    pub input: String,
    #[serde(deserialize_with = "nullable_string")]
    pub nonce: String,
    #[serde(deserialize_with = "nullable_string")]
    pub to: String,
    #[serde(deserialize_with = "nullable_string")]
    pub transaction_index: String,
    #[serde(deserialize_with = "nullable_string")]
    pub value: String,
    #[serde(deserialize_with = "nullable_string")]
    pub v: String,
    #[serde(deserialize_with = "nullable_string")]
    pub r: String,
    #[serde(deserialize_with = "nullable_string")]
    pub s: String,
}

impl Transaction {
    /// True for the all-empty record the node hands back for a missing index.
    pub fn is_empty(&self) -> bool {
        *self == Transaction::default()
    }
}

/// All transactions of one block, in transaction index order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionBatch {
    #[serde(skip)]
    pub block_hash: String,
    pub transactions: Vec<Transaction>,
}

impl TransactionBatch {
    pub fn new(block_hash: impl Into<String>, transactions: Vec<Transaction>) -> Self {
        Self {
            block_hash: block_hash.into(),
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncProgress {
    #[serde(deserialize_with = "nullable_string")]
    pub starting_block: String,
    #[serde(deserialize_with = "nullable_string")]
    pub current_block: String,
    #[serde(deserialize_with = "nullable_string")]
    pub highest_block: String,
}

/// Result of `eth_syncing`: a progress object while catching up, `false` once synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Syncing(SyncProgress),
    Synced,
}

impl Serialize for SyncStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SyncStatus::Syncing(progress) => progress.serialize(serializer),
            SyncStatus::Synced => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("syncing", &false)?;
                map.end()
            }
        }
    }
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn transaction_decodes_null_and_missing_fields_as_empty() {
        let tx: Transaction = serde_json::from_value(json!({
            "blockHash": "0xabc",
            "hash": "0x01",
            "to": null,
            "transactionIndex": "0x0",
            "type": "0x2"
        }))
        .unwrap();

        assert_eq!(tx.block_hash, "0xabc");
        assert_eq!(tx.to, "");
        assert_eq!(tx.gas_price, "");
        assert!(!tx.is_empty());
    }

    #[test]
    fn empty_object_is_the_missing_transaction_sentinel() {
        let tx: Transaction = serde_json::from_value(json!({})).unwrap();
        assert!(tx.is_empty());
    }

    #[test]
    fn batch_serializes_as_transactions_envelope() {
        let batch = TransactionBatch::new(
            "0xabc",
            vec![Transaction {
                hash: "0x01".into(),
                gas_price: "0x3b9aca00".into(),
                ..Default::default()
            }],
        );

        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(value["transactions"][0]["hash"], "0x01");
        assert_eq!(value["transactions"][0]["gasPrice"], "0x3b9aca00");
        assert!(value.get("blockHash").is_none());
    }

    #[test]
    fn sync_status_serialization() {
        let syncing = SyncStatus::Syncing(SyncProgress {
            starting_block: "0x0".into(),
            current_block: "0x10".into(),
            highest_block: "0x20".into(),
        });
        assert_eq!(
            serde_json::to_value(&syncing).unwrap(),
            json!({"startingBlock": "0x0", "currentBlock": "0x10", "highestBlock": "0x20"})
        );
        assert_eq!(serde_json::to_value(SyncStatus::Synced).unwrap(), json!({"syncing": false}));
    }
}
