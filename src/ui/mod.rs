/// UI screens
///
/// - Static marketing screen (landing.rs)
/// - Try-on workflow screen (studio.rs)

pub mod landing;
pub mod studio;
