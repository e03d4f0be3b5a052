use crate::string_serde::string_serde;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;


/// Fixed-width 32 byte digest (block and transaction ids, merkle roots).
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Checksum256(pub [u8; 32]);


impl Checksum256 {
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Reads the block number embedded into the first 4 bytes of a block id.
    pub fn block_num_prefix(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}


impl FromStr for Checksum256 {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}


impl Display for Checksum256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}


impl Debug for Checksum256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Checksum256({})", self)
    }
}


string_serde!(Checksum256);


/// Variable length byte string in hex form.
#[derive(Default, Clone, Eq, PartialEq, Hash)]
pub struct HexBytes(pub Vec<u8>);


impl Deref for HexBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}


impl From<Vec<u8>> for HexBytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}


impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map(Self)
    }
}


impl Display for HexBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}


impl Debug for HexBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "HexBytes({})", self)
    }
}


string_serde!(HexBytes);


#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_ID: &str = "0000000a8d5f4ad36c7e0ff7d7b6b5c3b4c1a0e2f3d4c5b6a79887766554433a";

    #[test]
    fn checksum_hex_form() {
        let id: Checksum256 = BLOCK_ID.parse().unwrap();
        assert_eq!(id.to_string(), BLOCK_ID);
        assert_eq!(id.block_num_prefix(), 10);
        assert_eq!(serde_json::to_string(&id).unwrap(), format!("\"{}\"", BLOCK_ID));
    }

    #[test]
    fn checksum_requires_32_bytes() {
        assert!("abcd".parse::<Checksum256>().is_err());
        assert!(serde_json::from_str::<Checksum256>("\"\"").is_err());
        assert!(BLOCK_ID.replace('a', "x").parse::<Checksum256>().is_err());
    }

    #[test]
    fn hex_bytes() {
        let bytes: HexBytes = serde_json::from_str("\"00ff10\"").unwrap();
        assert_eq!(&bytes[..], &[0x00, 0xff, 0x10]);
        assert_eq!(bytes.to_string(), "00ff10");

        let empty: HexBytes = serde_json::from_str("\"\"").unwrap();
        assert!(empty.is_empty());

        assert!("abc".parse::<HexBytes>().is_err());
    }
}
