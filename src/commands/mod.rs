//! CLI subcommands

pub mod build;
pub mod clean;
pub mod convert;
pub mod images;
pub mod init;
pub mod list;
