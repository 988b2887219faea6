mod observations;
mod reading;
mod stations;

pub use observations::*;
pub use reading::*;
pub use stations::*;
