//! Motion module for step-ticker.
//!
//! Provides planned blocks and their conversion into per-motor tick state.

mod block;
mod tick_info;

pub use block::{Block, Direction};
pub use tick_info::{convert, BlockInfo, Phase, TickInfo};
