use std::sync::Arc;

use folio_core_contact_contracts::SubmissionState;
use folio_extern_contracts::contact::MockContactApiService;
use folio_models::contact::ContactDraft;
use folio_shared_contracts::notification::MockNotificationService;
use tokio::sync::Mutex;

use crate::{ContactFeatureServiceImpl, Form};

mod update_field;

type Sut = ContactFeatureServiceImpl<MockContactApiService, MockNotificationService>;

fn make_draft() -> ContactDraft {
    ContactDraft {
        name: "Ann Lee".into(),
        email: "ann@example.com".into(),
        subject: "Hello there".into(),
        message: "This is a test message.".into(),
    }
}

fn make_form(draft: ContactDraft, state: SubmissionState) -> Arc<Mutex<Form>> {
    Arc::new(Mutex::new(Form { draft, state }))
}
