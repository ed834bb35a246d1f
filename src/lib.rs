pub mod binary_tree;
pub mod error;
pub mod menu;
pub mod perf;
pub mod tree;

pub use binary_tree::{TraceEvent, Tree};
pub use error::TreeError;
pub use tree::TreeOps;
