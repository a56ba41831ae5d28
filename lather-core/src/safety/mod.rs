//! Safety interlocks
//!
//! Final output clamp applied after every tick's state dispatch.

pub mod interlock;

pub use interlock::{enforce, violations, Violations};
