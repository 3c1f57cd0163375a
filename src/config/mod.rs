pub mod schema;

pub use schema::{Config, HoursConfig, SessionConfig};
