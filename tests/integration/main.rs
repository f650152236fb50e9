#[path = "../common/mod.rs"]
mod common;

mod session_flow;
