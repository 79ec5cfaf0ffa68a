pub mod arguments;
pub mod config;
pub mod errors;
pub mod homework;
pub mod logger;
pub mod poller;
pub mod run;
pub mod telegram;
pub mod version;
