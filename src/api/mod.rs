/// Virtual try-on backend API
///
/// - Request/response wire types (types.rs)
/// - Async reqwest client and response interpretation (client.rs)

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::TryOnRequest;
