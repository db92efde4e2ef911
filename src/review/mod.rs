pub mod batch;
pub mod classify;
pub mod decision;
pub mod types;

pub use batch::*;
pub use classify::*;
pub use decision::*;
pub use types::*;
