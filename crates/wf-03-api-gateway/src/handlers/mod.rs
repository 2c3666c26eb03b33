//! HTTP handlers, grouped by the service they front.

pub mod gemini;
pub mod system;
pub mod wifi;
