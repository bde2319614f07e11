//! Request middleware: the session gate and error mapping.

pub mod auth;
pub mod error;
