pub mod filesystem_store;
pub mod gemini;
pub mod memory_store;
pub mod mock_services;
pub mod retrying;
mod store_writes;
pub mod unconfigured;
pub mod youtube;

pub use filesystem_store::FilesystemPathwayStore;
pub use gemini::GeminiClient;
pub use memory_store::MemoryPathwayStore;
pub use mock_services::MockServices;
pub use retrying::{RetryPolicy, Retrying};
pub use unconfigured::UnconfiguredGeneration;
pub use youtube::YouTubeSearch;
