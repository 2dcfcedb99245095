/// Result actions: download to disk (download.rs) and share (share.rs).
/// Neither one modifies the stored result.

pub mod download;
pub mod share;
