use folio_core_contact_contracts::{ContactFeatureService, SubmissionState};
use folio_models::contact::{ContactDraft, ContactField};
use pretty_assertions::assert_eq;

use crate::tests::{make_draft, make_form, Sut};

#[tokio::test]
async fn fill_empty_form() {
    // Arrange
    let sut = Sut::default();

    // Act
    for field in ContactField::ALL {
        sut.update_field(field, make_draft().get(field).into()).await;
    }

    // Assert
    assert_eq!(sut.draft().await, make_draft());
    assert_eq!(sut.state().await, SubmissionState::Editing);
}

#[tokio::test]
async fn replace_single_field() {
    // Arrange
    let sut = Sut {
        form: make_form(make_draft(), SubmissionState::Editing),
        ..Sut::default()
    };

    // Act
    sut.update_field(ContactField::Email, "ann.lee@example.org".into()).await;

    // Assert
    assert_eq!(
        sut.draft().await,
        ContactDraft {
            email: "ann.lee@example.org".into(),
            ..make_draft()
        }
    );
}

#[tokio::test]
async fn no_validation_while_typing() {
    // Arrange
    let sut = Sut::default();

    // Act
    sut.update_field(ContactField::Email, "ann@".into()).await;
    sut.update_field(ContactField::Message, "x".repeat(2500)).await;

    // Assert
    let draft = sut.draft().await;
    assert_eq!(draft.email, "ann@");
    assert_eq!(draft.message_counter(), "2500/2000");
}

#[tokio::test]
async fn start_new_message_after_success() {
    // Arrange
    let sut = Sut {
        form: make_form(ContactDraft::default(), SubmissionState::Submitted),
        ..Sut::default()
    };

    // Act
    sut.update_field(ContactField::Name, "Bob".into()).await;

    // Assert
    assert_eq!(sut.state().await, SubmissionState::Editing);
    assert_eq!(sut.draft().await.name, "Bob");
}

#[tokio::test]
async fn edit_while_submitting() {
    // Arrange
    let sut = Sut {
        form: make_form(make_draft(), SubmissionState::Submitting),
        ..Sut::default()
    };

    // Act
    sut.update_field(ContactField::Subject, "Changed my mind".into()).await;

    // Assert
    assert_eq!(sut.state().await, SubmissionState::Submitting);
    assert_eq!(sut.draft().await.subject, "Changed my mind");
}
