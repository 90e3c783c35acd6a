pub mod category;
pub mod config;
pub mod error;
pub mod operator;
pub mod queue;
pub mod table;

pub use category::{Class, Stage};
pub use config::{Config, GameConfig, QueueConfig};
pub use error::{BnsAnimError, Result};
pub use operator::{FileCallback, FileInfo, FileLocation, Operator, RemoveResult, RestoreResult};
pub use queue::{build_queue, Selection};
