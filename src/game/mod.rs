pub mod matrix;
pub mod parser;
pub mod spec;
pub mod template;

pub use matrix::*;
pub use parser::*;
pub use spec::*;
pub use template::*;
