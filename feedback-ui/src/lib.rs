pub mod api;
pub mod app;
pub mod dashboard;
pub mod landing;
pub mod platform;

pub use app::App;
