//! Verification record store implementations

pub mod memory;
pub mod redis_store;

pub use memory::InMemoryRecordStore;
pub use redis_store::RedisRecordStore;
