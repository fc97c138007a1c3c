//! Integration tests

mod auth_flow_tests;
mod database_tests;
