use crate::string_serde::string_serde;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;


const MAX_PRECISION: u8 = 18;

const MAX_SYMBOL_CODE_LEN: usize = 7;


#[derive(Debug, Clone, Eq, PartialEq)]
pub struct InvalidAsset {
    pub value: String,
    pub reason: &'static str
}


impl Display for InvalidAsset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid asset `{}`: {}", self.value, self.reason)
    }
}


impl std::error::Error for InvalidAsset {}


/// Token symbol: precision in the low byte, up to 7 uppercase letters above it.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Symbol(u64);


impl Symbol {
    pub fn new(precision: u8, code: &str) -> Result<Self, InvalidAsset> {
        let invalid = |reason| InvalidAsset {
            value: format!("{},{}", precision, code),
            reason
        };

        if precision > MAX_PRECISION {
            return Err(invalid("precision is too large"))
        }
        if code.is_empty() || code.len() > MAX_SYMBOL_CODE_LEN {
            return Err(invalid("symbol code must have 1 to 7 characters"))
        }
        if !code.bytes().all(|c| c.is_ascii_uppercase()) {
            return Err(invalid("symbol code must consist of uppercase letters"))
        }

        let mut value = precision as u64;
        for (i, c) in code.bytes().enumerate() {
            value |= (c as u64) << (8 * (i + 1));
        }
        Ok(Self(value))
    }

    pub fn from_u64(value: u64) -> Result<Self, InvalidAsset> {
        let symbol = Self(value);
        let parsed = Self::new(symbol.precision(), &symbol.code())?;
        // the code must be contiguous, nothing may follow its terminating zero
        if parsed != symbol {
            return Err(InvalidAsset {
                value: format!("{:#018x}", value),
                reason: "symbol code has bytes after its end"
            })
        }
        Ok(parsed)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }

    pub fn precision(&self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub fn code(&self) -> String {
        self.0.to_le_bytes()[1..]
            .iter()
            .take_while(|c| **c != 0)
            .map(|c| *c as char)
            .collect()
    }
}


impl FromStr for Symbol {
    type Err = InvalidAsset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (precision, code) = s.split_once(',').ok_or_else(|| InvalidAsset {
            value: s.to_string(),
            reason: "expected `<precision>,<code>`"
        })?;
        let precision = precision.parse().map_err(|_| InvalidAsset {
            value: s.to_string(),
            reason: "invalid precision"
        })?;
        Self::new(precision, code)
    }
}


impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.precision(), self.code())
    }
}


impl Debug for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Symbol({})", self)
    }
}


string_serde!(Symbol);


/// Token quantity, e.g. `1.0000 EOS`.
#[derive(Default, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Asset {
    pub amount: i64,
    pub symbol: Symbol
}


impl FromStr for Asset {
    type Err = InvalidAsset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason| InvalidAsset {
            value: s.to_string(),
            reason
        };

        let (amount, code) = s.trim().split_once(' ').ok_or_else(|| invalid("expected `<amount> <code>`"))?;

        let (digits, precision) = match amount.split_once('.') {
            Some((int, frac)) => (format!("{}{}", int, frac), frac.len()),
            None => (amount.to_string(), 0)
        };

        let precision = u8::try_from(precision).map_err(|_| invalid("precision is too large"))?;
        let amount = digits.parse().map_err(|_| invalid("invalid amount"))?;
        let symbol = Symbol::new(precision, code.trim())?;

        Ok(Self {
            amount,
            symbol
        })
    }
}


impl Display for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let precision = self.symbol.precision() as u32;
        let scale = 10u64.pow(precision);
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        if precision == 0 {
            write!(f, "{}{} {}", sign, abs, self.symbol.code())
        } else {
            write!(
                f,
                "{}{}.{:0width$} {}",
                sign,
                abs / scale,
                abs % scale,
                self.symbol.code(),
                width = precision as usize
            )
        }
    }
}


impl Debug for Asset {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Asset({})", self)
    }
}


string_serde!(Asset);
