use crate::types::{decode_u64_option, JsonValue};
use eos_trace_codec::{ActionPayload, ActionRegistry};
use eos_trace_primitives::{
    BlockNumber, BlockTimestamp, Checksum256, HexBytes, Name, PermissionLevel, Signature, TimePointSec, Varuint32
};
use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub timestamp: BlockTimestamp,
    pub producer: Name,
    pub status: String,
    #[serde(rename = "previous_id")]
    pub previous: Checksum256,
    #[serde(rename = "transaction_mroot")]
    pub transaction_merkle_root: Checksum256,
    #[serde(rename = "action_mroot")]
    pub action_merkle_root: Checksum256,
    pub schedule_version: u32
}


#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Executed,
    SoftFail,
    HardFail,
    Delayed,
    Expired,
    #[serde(other)]
    Unknown
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransactionHeader {
    pub status: TransactionStatus,
    #[serde(rename = "cpu_usage_us")]
    pub cpu_usage_micro_seconds: u32,
    pub net_usage_words: Varuint32
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionDataValue {
    /// Serialized payload
    Hex(HexBytes),
    /// Payload the node already decoded with the contract ABI
    Json(JsonValue)
}


#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_data: Option<HexBytes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ActionDataValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_value: Option<HexBytes>
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub account: Name,
    #[serde(rename = "action")]
    pub name: Name,
    pub receiver: Name,
    #[serde(
        default,
        deserialize_with = "decode_u64_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub global_sequence: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authorization: Vec<PermissionLevel>,
    #[serde(flatten)]
    pub action_data: ActionData
}


impl Action {
    /// Serialized payload, if the node supplied one.
    pub fn raw_data(&self) -> Option<&[u8]> {
        if let Some(hex_data) = self.action_data.hex_data.as_deref() {
            return Some(hex_data)
        }
        match &self.action_data.data {
            Some(ActionDataValue::Hex(bytes)) => Some(&bytes[..]),
            _ => None
        }
    }

    /// Resolves the payload through the registry.
    ///
    /// `Ok(None)` means there is either no serialized payload
    /// or no decoder registered for `account::name`.
    pub fn decode_data(&self, registry: &ActionRegistry) -> anyhow::Result<Option<Box<dyn ActionPayload>>> {
        match self.raw_data() {
            Some(bytes) => registry.decode(self.account, self.name, bytes),
            None => Ok(None)
        }
    }

    pub fn is_notification(&self) -> bool {
        self.receiver != self.account
    }
}


#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionHeader {
    pub expiration: TimePointSec,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: Varuint32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: Varuint32
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub header: TransactionHeader,
    #[serde(rename = "transaction_header", default, skip_serializing_if = "Option::is_none")]
    pub nested_header: Option<TransactionHeader>,
    pub id: Checksum256,
    #[serde(default)]
    pub actions: Vec<Action>
}


impl Transaction {
    /// Nodes nest the header under `transaction_header`, older ones inline it.
    pub fn effective_header(&self) -> &TransactionHeader {
        self.nested_header.as_ref().unwrap_or(&self.header)
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    pub header: SignedTransactionHeader,
    #[serde(flatten)]
    pub transaction: Transaction,
    #[serde(default)]
    pub signatures: Vec<Signature>
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub header: BlockHeader,
    #[serde(default)]
    pub transactions: Vec<SignedTransaction>
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockResp {
    #[serde(flatten)]
    pub block: Block,
    pub id: Checksum256,
    #[serde(rename = "number")]
    pub block_num: BlockNumber
}


impl BlockResp {
    pub fn transactions(&self) -> &[SignedTransaction] {
        &self.block.transactions
    }

    /// All actions of the block in execution order.
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.block.transactions.iter().flat_map(|tx| tx.transaction.actions.iter())
    }
}


impl eos_trace_primitives::Block for BlockResp {
    fn number(&self) -> BlockNumber {
        self.block_num
    }

    fn hash(&self) -> &Checksum256 {
        &self.id
    }

    fn parent_number(&self) -> BlockNumber {
        self.block_num.saturating_sub(1)
    }

    fn parent_hash(&self) -> &Checksum256 {
        &self.block.header.previous
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.block.header.timestamp.unix_millis())
    }
}


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionTraceResp {
    #[serde(flatten)]
    pub transaction: SignedTransaction,
    pub block_num: BlockNumber,
    pub block_time: BlockTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer_block_id: Option<Checksum256>
}
