use crate::string_serde::string_serde;
use chrono::{DateTime, NaiveDateTime};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;


/// Milliseconds between the unix epoch and 2000-01-01T00:00:00.
const BLOCK_TIMESTAMP_EPOCH_MS: i64 = 946_684_800_000;

const BLOCK_INTERVAL_MS: i64 = 500;


fn parse_time(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s.trim_end_matches('Z'), "%Y-%m-%dT%H:%M:%S%.f")
}


/// Block production time, aligned to 500 ms slots.
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BlockTimestamp(NaiveDateTime);


impl BlockTimestamp {
    pub fn from_slot(slot: u32) -> Option<Self> {
        let ms = BLOCK_TIMESTAMP_EPOCH_MS + slot as i64 * BLOCK_INTERVAL_MS;
        DateTime::from_timestamp_millis(ms).map(|t| Self(t.naive_utc()))
    }

    pub fn slot(&self) -> u32 {
        let ms = self.unix_millis() - BLOCK_TIMESTAMP_EPOCH_MS;
        (ms / BLOCK_INTERVAL_MS).clamp(0, u32::MAX as i64) as u32
    }

    pub fn unix_millis(&self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }

    pub fn as_naive(&self) -> &NaiveDateTime {
        &self.0
    }
}


impl FromStr for BlockTimestamp {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).map(Self)
    }
}


impl Display for BlockTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}


impl Debug for BlockTimestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "BlockTimestamp({})", self)
    }
}


string_serde!(BlockTimestamp);


/// Second precision point in time (transaction expiration).
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct TimePointSec(NaiveDateTime);


impl TimePointSec {
    pub fn from_secs(secs: u32) -> Option<Self> {
        DateTime::from_timestamp(secs as i64, 0).map(|t| Self(t.naive_utc()))
    }

    pub fn unix_secs(&self) -> i64 {
        self.0.and_utc().timestamp()
    }
}


impl FromStr for TimePointSec {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_time(s).map(Self)
    }
}


impl Display for TimePointSec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}


impl Debug for TimePointSec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimePointSec({})", self)
    }
}


string_serde!(TimePointSec);
