pub mod base;
pub mod notification;

pub use base::{BaseDao, DaoError, DaoResult};
pub use notification::NotificationDao;
