use folio_di::Build;
use folio_models::notification::{Notification, NotificationKind};
use folio_shared_contracts::notification::NotificationService;
use folio_utils::trace_instrument;

/// Prints notifications to the terminal: successes to stdout, errors to
/// stderr.
#[derive(Debug, Clone, Copy, Default, Build)]
pub struct ConsoleNotificationService;

impl NotificationService for ConsoleNotificationService {
    #[trace_instrument(skip(self))]
    fn emit(&self, notification: Notification) {
        let rendered = render(&notification);
        match notification.kind {
            NotificationKind::Success => println!("{rendered}"),
            NotificationKind::Error => eprintln!("{rendered}"),
        }
    }
}

fn render(notification: &Notification) -> String {
    let marker = match notification.kind {
        NotificationKind::Success => "[ok]",
        NotificationKind::Error => "[error]",
    };
    format!(
        "{marker} {}\n{}",
        notification.title,
        indent(&notification.description)
    )
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_success() {
        let notification = Notification::success("Message Sent!", "Thanks for reaching out.");
        assert_eq!(
            render(&notification),
            "[ok] Message Sent!\n    Thanks for reaching out."
        );
    }

    #[test]
    fn render_error_multiline() {
        let notification = Notification::error("Error", "Invalid email\nPlease check it.");
        assert_eq!(
            render(&notification),
            "[error] Error\n    Invalid email\n    Please check it."
        );
    }
}
