// Interface adapters: wire protocol and the reqwest transport.

pub mod clients;
pub mod protocol;
