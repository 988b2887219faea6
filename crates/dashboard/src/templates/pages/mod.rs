pub mod dashboard;
mod error;

pub use dashboard::dashboard_page;
pub use error::error_page;
