pub mod cli;
pub mod conf;
pub mod logging;
pub mod logs;
pub mod notify;
