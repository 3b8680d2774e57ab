//! Markup rendering for dialogs and log entries.
//!
//! Rendering is pure: templates plus the current config in, a fragment out.
//! Labels are substituted here, at display time, so a label override made
//! while a request sat in the queue shows up when that request is displayed.

use super::DialogKind;
use crate::config::Config;
use crate::notify::LogEntry;

/// Presentation class vocabulary applied to the two singleton containers and
/// to log entries. Hosts translate these into whatever their surface uses.
pub mod classes {
    use crate::dialog::DialogKind;

    /// Base class carried by the dialog container at all times
    pub const DIALOG_BASE: &str = "hark";
    /// Dialog container while a dialog is displayed
    pub const DIALOG_SHOW: &str = "hark-show";
    /// Dialog container while dismissing
    pub const DIALOG_HIDE: &str = "hark-hide";
    /// Marks either singleton container as not displayed
    pub const HIDDEN: &str = "hark-hidden";
    /// Base class of the page-dimming overlay
    pub const OVERLAY: &str = "hark-overlay";
    /// Base class of a log entry
    pub const LOG_BASE: &str = "hark-log";
    /// Added to a log entry when its enter animation should run
    pub const LOG_SHOW: &str = "hark-log-show";

    /// Kind-specific style tag for the dialog container
    pub fn kind_class(kind: DialogKind) -> String {
        format!("hark-{}", kind.as_str())
    }

    /// Category-specific style tag for a log entry
    pub fn category_class(category: &str) -> String {
        format!("hark-log-{category}")
    }
}

/// A rendered dialog ready for the host to mount
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogFragment {
    /// Which dialog shape produced this fragment
    pub kind: DialogKind,
    /// The markup to place inside the dialog container
    pub markup: String,
}

/// Substitute one `{{name}}` placeholder
fn fill(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{{{name}}}}}"), value)
}

/// Build the markup for a dialog.
///
/// The message is inserted as-is; callers are trusted to supply safe markup.
pub(crate) fn render(kind: DialogKind, message: &str, config: &Config) -> DialogFragment {
    let templates = &config.templates;

    let mut content = fill(&templates.message, "message", message);
    if kind.has_input() {
        content.push_str(&templates.input);
    }

    let buttons = if kind.has_cancel() {
        format!("{}{}", templates.cancel_button, templates.ok_button)
    } else {
        templates.ok_button.clone()
    };
    content.push_str(&fill(&templates.button_holder, "buttons", &buttons));

    let mut markup = fill(&templates.shell, "content", &content);
    markup = fill(&markup, "ok", &config.labels.ok);
    markup = fill(&markup, "cancel", &config.labels.cancel);

    DialogFragment { kind, markup }
}

/// Build the markup for one log entry
pub(crate) fn render_log(entry: &LogEntry, config: &Config) -> String {
    let category = match entry.category.as_deref() {
        Some(category) if !category.is_empty() => {
            format!(" {}", classes::category_class(category))
        }
        _ => String::new(),
    };

    let markup = fill(&config.templates.log_entry, "category", &category);
    fill(&markup, "message", &entry.message)
}

/// Class strings for the dialog container and overlay while a dialog shows
pub(crate) fn visible_classes(kind: DialogKind) -> (String, String) {
    let container = format!(
        "{} {} {}",
        classes::DIALOG_BASE,
        classes::DIALOG_SHOW,
        classes::kind_class(kind)
    );
    (container, classes::OVERLAY.to_string())
}

/// Class strings for the dialog container and overlay once the queue drains
pub(crate) fn hidden_classes() -> (String, String) {
    let container = format!(
        "{} {} {}",
        classes::DIALOG_BASE,
        classes::DIALOG_HIDE,
        classes::HIDDEN
    );
    let overlay = format!("{} {}", classes::OVERLAY, classes::HIDDEN);
    (container, overlay)
}
