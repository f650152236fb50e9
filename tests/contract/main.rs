#[path = "../common/mod.rs"]
mod common;

mod token_endpoint;
