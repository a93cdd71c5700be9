mod restaurant_detail;
mod restaurants;

pub use restaurant_detail::*;
pub use restaurants::*;
