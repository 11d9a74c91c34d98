pub mod cache;

mod macros;

pub use self::cache::{create_redis_client, Cache, CacheKey, CacheWriterHandle};
