//! In-process push delivery: the per-user channel registry and the channel
//! capability it writes to.

pub mod channel;
pub mod hub;

pub use channel::{ChannelError, ChannelHandle, PushChannel};
pub use hub::Hub;

#[cfg(test)]
pub(crate) mod testing;
