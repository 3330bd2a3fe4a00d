use std::sync::Arc;
use taskhub_config::Settings;
use taskhub_services::{
    AuthService, Hub, NotificationDispatcher, NotificationService,
    notification::NotificationStore,
};

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub auth: Arc<AuthService>,
    pub hub: Hub,
    pub dispatcher: NotificationDispatcher,
    pub notifications: Arc<NotificationService>,
}

impl AppState {
    /// Wires the hub, dispatcher and read service around a single record
    /// store. Domain code pushes notifications through `dispatcher`.
    pub fn new(settings: Settings, store: Arc<dyn NotificationStore>) -> Self {
        let auth = Arc::new(AuthService::new(settings.jwt.clone()));
        let hub = Hub::new();
        let dispatcher = NotificationDispatcher::new(
            store.clone(),
            hub.clone(),
            settings.notifications.max_concurrent_deliveries,
        );
        let notifications = Arc::new(NotificationService::new(store));

        Self {
            settings,
            auth,
            hub,
            dispatcher,
            notifications,
        }
    }
}
