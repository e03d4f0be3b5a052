use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;


pub(crate) struct StringParser<T> {
    phantom_data: PhantomData<T>
}


impl <T> StringParser<T> {
    pub fn new() -> Self {
        Self {
            phantom_data: PhantomData::default()
        }
    }
}


impl <'de, T> serde::de::Visitor<'de> for StringParser<T>
where
    T: FromStr,
    T::Err: Display
{
    type Value = T;

    fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "a string literal representing {}", std::any::type_name::<T>())
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        T::from_str(v).map_err(serde::de::Error::custom)
    }
}


/// Implements `Serialize` via `Display` and `Deserialize` via `FromStr`.
macro_rules! string_serde {
    ($t:ty) => {
        impl serde::Serialize for $t {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: serde::Serializer
            {
                serializer.collect_str(self)
            }
        }

        impl <'de> serde::Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>
            {
                deserializer.deserialize_str($crate::string_serde::StringParser::<$t>::new())
            }
        }
    };
}


pub(crate) use string_serde;
