use folio_core_contact_impl::ContactFeatureServiceImpl;
use folio_extern_impl::contact::ContactApiServiceImpl;
use folio_shared_impl::notification::ConsoleNotificationService;

// Extern
pub type ContactApi = ContactApiServiceImpl;

// Shared
pub type Notifications = ConsoleNotificationService;

// Core
pub type ContactFeature = ContactFeatureServiceImpl<ContactApi, Notifications>;
