pub mod error;
pub mod roster;
pub mod tenant;
pub mod types;

pub use error::*;
pub use roster::*;
pub use tenant::*;
pub use types::*;
