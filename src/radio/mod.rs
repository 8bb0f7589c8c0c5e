pub mod block;
pub mod parser;
pub mod raw;

pub use block::*;
pub use parser::*;
pub use raw::*;
