pub mod render;
pub mod report;
pub mod tier;

pub use render::*;
pub use report::*;
pub use tier::*;
