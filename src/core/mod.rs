pub mod error;
pub mod record;
pub mod value;

pub use error::{ApiError, Result};
pub use record::{Entity, Record};
pub use value::{Symbol, Value};
