//! Notification creation, persistence and live delivery.
//!
//! Domain code describes what happened as a [`DomainEvent`]; the
//! [`NotificationDispatcher`] turns each resulting notice into a stored
//! record and pushes it through the [`Hub`](crate::realtime::Hub).

pub mod dispatcher;
pub mod events;
pub mod service;
pub mod store;
pub mod wire;

pub use dispatcher::{NewNotification, NotificationDispatcher};
pub use events::DomainEvent;
pub use service::NotificationService;
pub use store::{MemoryNotificationStore, NotificationStore};
pub use wire::NotificationResponse;
