pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::*;
pub use response::*;
pub use server::*;
