pub mod channel;
pub mod handler;
