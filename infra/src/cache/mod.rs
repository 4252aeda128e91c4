//! Redis-backed liveness cache

pub mod redis_client;
pub mod redis_token_cache;

pub use redis_client::RedisClient;
pub use redis_token_cache::RedisTokenCache;
