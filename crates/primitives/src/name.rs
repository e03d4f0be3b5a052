use crate::string_serde::string_serde;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;


const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

const MAX_NAME_LEN: usize = 13;


/// 64-bit base32 account, action and permission name.
///
/// The first 12 characters take 5 bits each, the optional 13th character
/// takes the remaining 4 bits and is therefore limited to `.1-5a-j`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Name(u64);


impl Name {
    pub const fn from_u64(value: u64) -> Self {
        Self(value)
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}


#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidName {
    pub name: String
}


impl Display for InvalidName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a valid name", self.name)
    }
}


impl std::error::Error for InvalidName {}


fn char_to_symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some((c - b'a') as u64 + 6),
        b'1'..=b'5' => Some((c - b'1') as u64 + 1),
        b'.' => Some(0),
        _ => None
    }
}


impl FromStr for Name {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidName {
            name: s.to_string()
        };

        if s.len() > MAX_NAME_LEN {
            return Err(invalid())
        }

        let mut value = 0u64;
        for (i, c) in s.bytes().enumerate() {
            let symbol = char_to_symbol(c).ok_or_else(invalid)?;
            if i < MAX_NAME_LEN - 1 {
                value |= symbol << (64 - 5 * (i + 1));
            } else {
                if symbol > 0x0f {
                    return Err(invalid())
                }
                value |= symbol;
            }
        }

        Ok(Name(value))
    }
}


impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut chars = [b'.'; MAX_NAME_LEN];
        let mut tmp = self.0;
        for i in 0..MAX_NAME_LEN {
            let mask = if i == 0 { 0x0f } else { 0x1f };
            chars[MAX_NAME_LEN - 1 - i] = CHARMAP[(tmp & mask) as usize];
            tmp >>= if i == 0 { 4 } else { 5 };
        }
        let len = chars.iter().rposition(|c| *c != b'.').map_or(0, |pos| pos + 1);
        // CHARMAP is pure ASCII
        f.write_str(std::str::from_utf8(&chars[..len]).map_err(|_| std::fmt::Error)?)
    }
}


impl Debug for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Name({})", self)
    }
}


string_serde!(Name);
