//! Authentication endpoints

pub mod login;
pub mod models;
pub mod password;
pub mod register;
