use crate::token::{self, Issue, Retire, Transfer};
use crate::{ChainDecode, Decoder};
use anyhow::Context;
use eos_trace_primitives::{HexBytes, Name, PermissionLevel};
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;


/// Typed action payload produced by an [ActionRegistry] decoder.
pub trait ActionPayload: Any + Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn to_json(&self) -> anyhow::Result<serde_json::Value>;
}


impl<T: Any + Debug + Send + Sync + Serialize> ActionPayload for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn to_json(&self) -> anyhow::Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| e.into())
    }
}


impl dyn ActionPayload {
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}


type DecodeFn = fn(&[u8]) -> anyhow::Result<Box<dyn ActionPayload>>;


fn decode_payload<T: ChainDecode + ActionPayload>(data: &[u8]) -> anyhow::Result<Box<dyn ActionPayload>> {
    let mut decoder = Decoder::new(data);
    decoder.set_decode_actions(false);
    let payload: T = decoder.decode()?;
    Ok(Box::new(payload))
}


/// Decoders for action payloads keyed by `(account, action)`.
pub struct ActionRegistry {
    decoders: HashMap<(Name, Name), DecodeFn>
}


impl ActionRegistry {
    /// Registry without any decoders.
    pub fn empty() -> Self {
        Self {
            decoders: HashMap::new()
        }
    }

    pub fn register<T: ChainDecode + ActionPayload>(&mut self, account: Name, action: Name) {
        self.decoders.insert((account, action), decode_payload::<T>);
    }

    pub fn contains(&self, account: Name, action: Name) -> bool {
        self.decoders.contains_key(&(account, action))
    }

    /// Returns `Ok(None)` when no decoder is registered for the action.
    pub fn decode(
        &self,
        account: Name,
        action: Name,
        data: &[u8]
    ) -> anyhow::Result<Option<Box<dyn ActionPayload>>>
    {
        let Some(decode) = self.decoders.get(&(account, action)) else {
            return Ok(None)
        };
        decode(data)
            .with_context(|| format!("failed to decode {}::{} payload", account, action))
            .map(Some)
    }
}


impl Default for ActionRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register::<Transfer>(token::ACCOUNT, token::TRANSFER);
        registry.register::<Issue>(token::ACCOUNT, token::ISSUE);
        registry.register::<Retire>(token::ACCOUNT, token::RETIRE);
        registry
    }
}


/// Action in its binary form.
#[derive(Debug)]
pub struct RawAction {
    pub account: Name,
    pub name: Name,
    pub authorization: Vec<PermissionLevel>,
    pub data: HexBytes,
    /// Set only when the decoder resolves actions and has a registry.
    pub payload: Option<Box<dyn ActionPayload>>
}


impl ChainDecode for RawAction {
    fn decode(decoder: &mut Decoder<'_>) -> anyhow::Result<Self> {
        let account = decoder.decode()?;
        let name = decoder.decode()?;
        let authorization = decoder.decode()?;
        let data: HexBytes = decoder.decode()?;

        let payload = match decoder.action_registry() {
            Some(registry) => registry.decode(account, name, &data)?,
            None => None
        };

        Ok(Self {
            account,
            name,
            authorization,
            data,
            payload
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    // alice -> bob, 1.0000 EOS, "hi"
    const TRANSFER_HEX: &str = "0000000000855c340000000000000e3d102700000000000004454f5300000000026869";

    fn raw_transfer_action() -> Vec<u8> {
        let payload = hex::decode(TRANSFER_HEX).unwrap();
        let mut data = Vec::new();
        data.extend_from_slice(&token::ACCOUNT.as_u64().to_le_bytes());
        data.extend_from_slice(&token::TRANSFER.as_u64().to_le_bytes());
        data.push(1);
        data.extend_from_slice(&"alice".parse::<Name>().unwrap().as_u64().to_le_bytes());
        data.extend_from_slice(&"active".parse::<Name>().unwrap().as_u64().to_le_bytes());
        data.push(payload.len() as u8);
        data.extend_from_slice(&payload);
        data
    }

    #[test]
    fn registry_resolves_transfer() {
        let registry = ActionRegistry::default();
        let payload = registry
            .decode(token::ACCOUNT, token::TRANSFER, &hex::decode(TRANSFER_HEX).unwrap())
            .unwrap()
            .unwrap();

        let transfer = payload.downcast_ref::<Transfer>().unwrap();
        assert_eq!(transfer.quantity.to_string(), "1.0000 EOS");
        assert!(!payload.is::<Issue>());

        let json = payload.to_json().unwrap();
        assert_eq!(json["from"], "alice");
        assert_eq!(json["memo"], "hi");
    }

    #[test]
    fn unknown_action_is_not_an_error() {
        let registry = ActionRegistry::default();
        let account = "eosio".parse().unwrap();
        let action = "newaccount".parse().unwrap();
        assert!(!registry.contains(account, action));
        assert!(registry.decode(account, action, &[1, 2, 3]).unwrap().is_none());
    }

    #[test]
    fn raw_action_payload_depends_on_decode_actions() {
        let data = raw_transfer_action();
        let registry = ActionRegistry::default();

        let mut decoder = Decoder::new(&data);
        decoder.set_registry(&registry);
        let action: RawAction = decoder.decode().unwrap();
        assert_eq!(action.authorization[0].to_string(), "alice@active");
        assert!(action.payload.unwrap().is::<Transfer>());

        let mut decoder = Decoder::new(&data);
        decoder.set_registry(&registry);
        decoder.set_decode_actions(false);
        let action: RawAction = decoder.decode().unwrap();
        assert!(action.payload.is_none());
        assert_eq!(action.data.to_string(), TRANSFER_HEX);
    }
}
