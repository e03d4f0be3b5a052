//! Records of the standard `eosio.token` contract.

use crate::{ChainDecode, Decoder};
use eos_trace_primitives::{Asset, Name};
use serde::{Deserialize, Serialize};


pub const ACCOUNT: Name = Name::from_u64(0x5530ea033482a600);

pub const TRANSFER: Name = Name::from_u64(0xcdcd3c2d57000000);

pub const ISSUE: Name = Name::from_u64(0x7631a50000000000);

pub const RETIRE: Name = Name::from_u64(0xbab2eba800000000);


#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: Name,
    pub to: Name,
    pub quantity: Asset,
    pub memo: String
}


impl ChainDecode for Transfer {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        Ok(Self {
            from: decoder.decode()?,
            to: decoder.decode()?,
            quantity: decoder.decode()?,
            memo: decoder.decode()?
        })
    }
}


#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub to: Name,
    pub quantity: Asset,
    pub memo: String
}


impl ChainDecode for Issue {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        Ok(Self {
            to: decoder.decode()?,
            quantity: decoder.decode()?,
            memo: decoder.decode()?
        })
    }
}


#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Retire {
    pub quantity: Asset,
    pub memo: String
}


impl ChainDecode for Retire {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        Ok(Self {
            quantity: decoder.decode()?,
            memo: decoder.decode()?
        })
    }
}
