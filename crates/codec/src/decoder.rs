use crate::ActionRegistry;
use anyhow::{anyhow, bail, ensure, Context};
use eos_trace_primitives::{
    Asset, BlockTimestamp, Checksum256, HexBytes, Name, PermissionLevel, Symbol, TimePointSec, Varuint32
};
use std::fmt::{Display, Formatter};


#[derive(Debug)]
pub struct UnexpectedEof {
    pub position: usize,
    pub needed: usize,
    pub available: usize
}


impl Display for UnexpectedEof {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unexpected end of input at offset {}: need {} bytes, {} available",
            self.position,
            self.needed,
            self.available
        )
    }
}


impl std::error::Error for UnexpectedEof {}


pub trait ChainDecode: Sized {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self>;
}


/// Reader of the binary chain serialization format.
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    decode_actions: bool,
    registry: Option<&'a ActionRegistry>
}


impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            decode_actions: true,
            registry: None
        }
    }

    /// Controls whether embedded actions get their payload resolved
    /// through the registry. When off, action data stays raw bytes.
    pub fn set_decode_actions(&mut self, yes: bool) {
        self.decode_actions = yes
    }

    pub fn set_registry(&mut self, registry: &'a ActionRegistry) {
        self.registry = Some(registry)
    }

    pub fn action_registry(&self) -> Option<&'a ActionRegistry> {
        if self.decode_actions {
            self.registry
        } else {
            None
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn decode<T: ChainDecode>(&mut self) -> anyhow::Result<T> {
        T::decode(self)
    }

    pub fn read_bytes(&mut self, len: usize) -> anyhow::Result<&'a [u8]> {
        if len > self.remaining() {
            bail!(UnexpectedEof {
                position: self.pos,
                needed: len,
                available: self.remaining()
            })
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> anyhow::Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    pub fn read_varuint32(&mut self) -> anyhow::Result<u32> {
        let mut value = 0u64;
        let mut shift = 0;
        loop {
            let [byte] = self.read_array::<1>()?;
            value |= ((byte & 0x7f) as u64) << shift;
            if byte & 0x80 == 0 {
                break
            }
            shift += 7;
            ensure!(shift < 35, "varuint32 at offset {} is too long", self.pos);
        }
        u32::try_from(value).map_err(|_| anyhow!("varuint32 value {} overflows u32", value))
    }

    fn read_len(&mut self) -> anyhow::Result<usize> {
        self.read_varuint32().map(|len| len as usize)
    }
}


macro_rules! decode_le {
    ($($t:ty),*) => {
        $(
            impl ChainDecode for $t {
                #[inline]
                fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
                    decoder.read_array().map(<$t>::from_le_bytes)
                }
            }
        )*
    };
}


decode_le!(u8, u16, u32, u64, i64);


impl ChainDecode for bool {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        match decoder.decode::<u8>()? {
            0 => Ok(false),
            1 => Ok(true),
            b => bail!("invalid bool byte {}", b)
        }
    }
}


impl ChainDecode for Varuint32 {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        decoder.read_varuint32().map(Varuint32)
    }
}


impl ChainDecode for String {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let len = decoder.read_len()?;
        let bytes = decoder.read_bytes(len)?;
        String::from_utf8(bytes.to_vec()).context("string is not valid utf-8")
    }
}


impl ChainDecode for HexBytes {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let len = decoder.read_len()?;
        decoder.read_bytes(len).map(|bytes| HexBytes(bytes.to_vec()))
    }
}


impl<T: ChainDecode> ChainDecode for Vec<T> {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let len = decoder.read_len()?;
        let mut items = Vec::with_capacity(std::cmp::min(len, decoder.remaining()));
        for i in 0..len {
            let item = decoder.decode().with_context(|| format!("failed to decode item {}", i))?;
            items.push(item);
        }
        Ok(items)
    }
}


impl<T: ChainDecode> ChainDecode for Option<T> {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        if decoder.decode()? {
            decoder.decode().map(Some)
        } else {
            Ok(None)
        }
    }
}


impl ChainDecode for Name {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        decoder.decode().map(Name::from_u64)
    }
}


impl ChainDecode for Symbol {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let value = decoder.decode()?;
        Ok(Symbol::from_u64(value)?)
    }
}


impl ChainDecode for Asset {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        Ok(Asset {
            amount: decoder.decode()?,
            symbol: decoder.decode()?
        })
    }
}


impl ChainDecode for Checksum256 {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        decoder.read_array().map(Checksum256)
    }
}


impl ChainDecode for PermissionLevel {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        Ok(PermissionLevel {
            actor: decoder.decode()?,
            permission: decoder.decode()?
        })
    }
}


impl ChainDecode for BlockTimestamp {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let slot = decoder.decode()?;
        BlockTimestamp::from_slot(slot).ok_or_else(|| anyhow!("block timestamp slot {} is out of range", slot))
    }
}


impl ChainDecode for TimePointSec {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let secs = decoder.decode()?;
        TimePointSec::from_secs(secs).ok_or_else(|| anyhow!("time point {} is out of range", secs))
    }
}
