/// Image payload handling
///
/// - Data URL encoding and decoding (data_url.rs)
/// - Reading picked files with the upload size limit (ingest.rs)

pub mod data_url;
pub mod ingest;

pub use data_url::DataUrl;
