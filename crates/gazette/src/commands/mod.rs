//! CLI commands.

pub mod build;
pub mod feed;
pub mod init;
pub mod serve;
