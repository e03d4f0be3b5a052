use crate::{Checksum256, Name};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};


pub type BlockNumber = u32;


/// Variable-width unsigned integer. Plain number in JSON, LEB128 on the wire.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Varuint32(pub u32);


impl From<Varuint32> for u32 {
    fn from(value: Varuint32) -> Self {
        value.0
    }
}


/// Authorization grant: an actor and the permission it acts with.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PermissionLevel {
    #[serde(rename = "account")]
    pub actor: Name,
    pub permission: Name
}


impl Display for PermissionLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.actor, self.permission)
    }
}


#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct BlockRef {
    pub number: BlockNumber,
    pub hash: Checksum256
}


impl Display for BlockRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.number, self.hash)
    }
}


pub trait Block {
    fn number(&self) -> BlockNumber;

    fn hash(&self) -> &Checksum256;

    fn parent_number(&self) -> BlockNumber;

    fn parent_hash(&self) -> &Checksum256;

    /// Block time in unix milliseconds.
    fn timestamp(&self) -> Option<i64> {
        None
    }

    #[inline]
    fn block_ref(&self) -> BlockRef {
        BlockRef {
            number: self.number(),
            hash: *self.hash()
        }
    }

    #[inline]
    fn parent_ref(&self) -> BlockRef {
        BlockRef {
            number: self.parent_number(),
            hash: *self.parent_hash()
        }
    }
}
