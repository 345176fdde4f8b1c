pub mod retrying_resolver;

pub use retrying_resolver::{RetriedResolution, RetryingResolver};
