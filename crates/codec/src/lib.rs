//! Trace packet codec.
//!
//! InkML stores a trace as comma-separated points whose integer channel
//! values are delta-compressed: the first point is absolute, the second
//! carries first derivatives, and every later point carries second
//! derivative increments. This crate tokenizes the packet text, undoes the
//! derivative coding, and reports per-channel statistics for every decoded
//! value.

pub mod aggregate;
pub mod packet;
pub mod scanner;
mod warning;

pub use aggregate::{ChannelAggregates, ChannelStats};
pub use packet::{decode, encode, DecodedTrace};
pub use warning::DecodeWarning;
