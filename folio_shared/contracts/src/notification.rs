use folio_models::notification::Notification;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait NotificationService: Send + Sync + 'static {
    /// Show a notification to the user.
    fn emit(&self, notification: Notification);
}

#[cfg(feature = "mock")]
impl MockNotificationService {
    pub fn with_emit(mut self, notification: Notification) -> Self {
        self.expect_emit()
            .once()
            .with(mockall::predicate::eq(notification))
            .return_const(());
        self
    }
}
