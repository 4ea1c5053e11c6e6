//! Redis result store
//!
//! ## Module Structure
//!
//! - `pool` - Connection management and health checks
//! - `cache` - Key-value operations and the `ResultStore` implementation
//! - `tests` - Module tests

mod cache;
mod pool;

pub use pool::RedisPool;
