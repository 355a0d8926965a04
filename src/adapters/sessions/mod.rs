//! Session store adapters.

mod in_memory;
mod redis;

pub use in_memory::InMemorySessionRepository;
pub use self::redis::RedisSessionRepository;
