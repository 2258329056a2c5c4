pub mod classification;
pub mod distance;
pub mod regression;
pub mod summary;

pub use classification::*;
pub use distance::*;
pub use regression::*;
pub use summary::*;
