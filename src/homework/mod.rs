//! Homework API: fetching, response validation and status formatting
//!
//! ```text
//! homework/
//! ├── client.rs      # HomeworkSource trait + Practicum HTTP client
//! ├── validator.rs   # Response shape checks
//! ├── status.rs      # Record -> chat message
//! └── types.rs       # HomeworkStatus, Homework
//! ```

pub mod client;
pub mod status;
pub mod types;
pub mod validator;

pub use client::{HomeworkSource, PracticumClient};
pub use status::{failure_message, fill_template, parse_status, status_message};
pub use types::{Homework, HomeworkStatus};
pub use validator::check_response;
