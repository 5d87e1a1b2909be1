pub mod check;
pub mod encode;
pub mod error;
pub mod init;
pub mod start;
