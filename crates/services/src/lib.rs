pub mod auth;
pub mod dao;
pub mod notification;
pub mod realtime;

pub use auth::AuthService;
pub use dao::*;
pub use notification::{NotificationDispatcher, NotificationService};
pub use realtime::Hub;
