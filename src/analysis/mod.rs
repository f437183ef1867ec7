pub mod equilibrium;
pub mod expectation;
pub mod mixed;

pub use equilibrium::*;
pub use expectation::*;
pub use mixed::*;
