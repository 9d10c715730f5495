#![forbid(unsafe_code)]

mod kinds;
mod pointer;
mod status;

pub use kinds::*;
pub use pointer::*;
pub use status::*;
