pub mod adapter;
pub mod function_block;
pub mod interface;
pub mod network;
pub mod patcher;
pub mod types;
pub mod xml;

pub use adapter::*;
pub use function_block::*;
pub use interface::*;
pub use network::*;
pub use patcher::*;
pub use types::*;
