use crate::string_serde::string_serde;
use std::convert::Infallible;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;


/// Transaction signature in its string form (`SIG_K1_...`).
///
/// Signatures are carried verbatim, they are never parsed into curve points
/// or verified.
#[derive(Default, Clone, Eq, PartialEq, Hash)]
pub struct Signature(String);


impl Signature {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Curve type tag, e.g. `K1`, `R1` or `WA`.
    pub fn key_type(&self) -> Option<&str> {
        self.0.strip_prefix("SIG_")?.split('_').next()
    }
}


impl FromStr for Signature {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}


impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}


impl Debug for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Signature({})", self.0)
    }
}


string_serde!(Signature);
