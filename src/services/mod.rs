// Service exports
pub mod cache;

pub use cache::{CacheKey, MatchCache, DEFAULT_MATCH_CACHE_CAPACITY};
