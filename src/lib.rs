pub mod client;
pub mod cmd;
pub mod config;
pub mod display;
pub mod filelock;
pub mod logs;
pub mod session;
pub mod table;
pub mod time;
pub mod types;
pub mod utils;
