pub mod client;
pub mod memory;
pub mod store;

pub use client::S3Client;
pub use memory::MemoryStore;
pub use store::ObjectStore;
