pub mod prediction;
pub mod price;
pub mod sentiment;
pub mod signals;

pub use prediction::*;
pub use price::*;
pub use sentiment::*;
pub use signals::*;
