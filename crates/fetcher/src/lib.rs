mod cache;
mod domains;
mod error;
mod fetcher;
mod merge;
mod ramp;
mod timestamp;

pub use cache::*;
pub use domains::*;
pub use error::*;
pub use fetcher::*;
pub use merge::*;
pub use ramp::*;
pub use timestamp::*;
