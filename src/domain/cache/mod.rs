//! Cache domain - key/value caching abstraction layer

mod key;
mod repository;

pub use key::TeamCacheKey;
pub use repository::{Cache, CacheExt};

#[cfg(test)]
pub use repository::mock::MockCache;
