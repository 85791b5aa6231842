//! Output serialization.

mod json;

pub use json::{to_json, JsonFormat};
