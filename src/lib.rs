mod client;
pub mod config;
pub mod endpoint;
pub mod errors;
pub mod request;
pub mod retry;
mod session;
pub mod tasks;
pub mod telemetry;
pub mod token;

pub use client::{AuthClient, RefreshFuture, TokenRefresher};
pub use config::{Config, ConfigLocation, read_config};
pub use errors::Error;
pub use request::RequestDescriptor;
pub use session::TodoClient;
