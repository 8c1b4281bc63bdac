pub mod config;
pub mod history;
pub mod import;
pub mod init;
pub mod projects;
pub mod verify;
