pub mod session;
pub mod status;

pub use session::*;
pub use status::*;
