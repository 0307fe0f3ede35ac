pub mod fetch;
pub mod registry;
pub mod resolver;

pub use fetch::{ChainFetcher, ChainSnapshot, HttpChainFetcher};
pub use registry::NodeRegistry;
pub use resolver::{ConflictResolver, Resolution};
