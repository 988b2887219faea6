mod column_map;
mod rainfall_legend;

pub use column_map::*;
pub use rainfall_legend::rainfall_legend;
