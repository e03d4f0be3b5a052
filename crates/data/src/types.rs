pub use serde_json::Value as JsonValue;


struct LenientU64Visitor;


impl <'de> serde::de::Visitor<'de> for LenientU64Visitor {
    type Value = u64;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "an unsigned integer or a string literal representing it")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        u64::try_from(v).map_err(|_| {
            serde::de::Error::custom(format!("expected an unsigned integer, got {}", v))
        })
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(|_| {
            serde::de::Error::custom(format!("failed to deserialize `{}` as u64", v))
        })
    }
}


struct LenientU64(u64);


impl <'de> serde::Deserialize<'de> for LenientU64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>
    {
        deserializer.deserialize_any(LenientU64Visitor).map(LenientU64)
    }
}


/// Accepts both `123` and `"123"`, the node uses either form for 64-bit counters.
pub fn decode_u64_option<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>
{
    let value: Option<LenientU64> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.map(|v| v.0))
}


#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Counter {
        #[serde(default, deserialize_with = "super::decode_u64_option")]
        value: Option<u64>
    }

    fn parse(json: &str) -> serde_json::Result<Option<u64>> {
        serde_json::from_str::<Counter>(json).map(|c| c.value)
    }

    #[test]
    fn lenient_u64() {
        assert_eq!(parse(r#"{"value": 18446744073709551615}"#).unwrap(), Some(u64::MAX));
        assert_eq!(parse(r#"{"value": "18446744073709551615"}"#).unwrap(), Some(u64::MAX));
        assert_eq!(parse(r#"{"value": null}"#).unwrap(), None);
        assert_eq!(parse(r#"{}"#).unwrap(), None);
        assert!(parse(r#"{"value": -1}"#).is_err());
        assert!(parse(r#"{"value": "abc"}"#).is_err());
    }
}
