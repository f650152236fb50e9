pub mod claims;
mod file;
mod memory;
mod pair;
mod store;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;
pub use pair::{StoredTokens, TokenPair};
pub use store::TokenStore;
