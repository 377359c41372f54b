pub mod error;
pub mod form;
pub mod ladder;
pub mod types;

pub use error::*;
pub use form::*;
pub use ladder::*;
pub use types::*;
