mod metadata_lookup;
mod token_release;
mod token_store;

pub use metadata_lookup::WorkflowMetadataLookup;
pub use token_release::TokenReleasePort;
pub use token_store::TokenStore;
