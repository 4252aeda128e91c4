//! Liveness cache: a TTL key-value store consulted on every guarded request.

mod liveness;
mod memory;
mod traits;

pub use liveness::{check_liveness, check_subject_liveness};
pub use memory::InMemoryTokenCache;
pub use traits::TokenCache;
