pub mod notification;

pub use notification::{Notification, ReferenceType};
