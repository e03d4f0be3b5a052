use anyhow::Context;
use eos_trace_codec::token::Transfer;
use eos_trace_codec::Decoder;


/// Decodes a hex encoded `eosio.token::transfer` payload.
pub fn decode_transfer(hex_string: &str) -> anyhow::Result<Transfer> {
    let data = hex::decode(hex_string).context("transfer payload is not valid hex")?;
    let mut decoder = Decoder::new(&data);
    decoder.set_decode_actions(false);
    decoder.decode().context("failed to decode transfer payload")
}
