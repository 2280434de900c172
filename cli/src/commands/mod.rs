pub mod close;
pub mod config;
pub mod init;
pub mod profile;
pub mod report;
pub mod services;
pub mod sync;
pub mod users;
