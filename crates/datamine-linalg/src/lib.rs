pub mod matrix;
pub mod normal;
pub mod solve;

pub use matrix::*;
pub use normal::*;
pub use solve::*;
