//! Cross-subsystem integration flows.

pub mod directory_flows;
pub mod fanout_flows;
pub mod http_flows;
