//! Runtime configuration: button labels, timing, markup templates.
//!
//! Everything here is mutable through the session at any point; last write
//! wins. Labels and templates are read when a dialog is rendered, not when it
//! is requested, so an override made while a request sits in the queue is
//! honored once that request is displayed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Button labels substituted into dialog markup at render time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    /// Label for the OK / confirm control
    pub ok: String,

    /// Label for the Cancel / dismiss control
    pub cancel: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            ok: "OK".to_string(),
            cancel: "Cancel".to_string(),
        }
    }
}

/// Markup fragment templates for dialogs and log entries.
///
/// Placeholders use the `{{name}}` convention. The defaults produce a plain
/// HTML structure; hosts with a different surface can swap in their own
/// fragments as long as the same placeholders appear.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Templates {
    /// Outer dialog shell; receives `{{content}}`
    pub shell: String,

    /// Message block; receives `{{message}}`
    pub message: String,

    /// Single-line text input inserted for prompt dialogs
    pub input: String,

    /// Container for the button row; receives `{{buttons}}`
    pub button_holder: String,

    /// OK control; receives `{{ok}}`
    pub ok_button: String,

    /// Cancel control; receives `{{cancel}}`
    pub cancel_button: String,

    /// Transient log entry; receives `{{category}}` and `{{message}}`
    pub log_entry: String,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            shell: "<div class=\"hark-dialog\"><article class=\"hark-inner\">{{content}}</article></div>".to_string(),
            message: "<p class=\"hark-message\">{{message}}</p>".to_string(),
            input: "<input type=\"text\" class=\"hark-input\" id=\"hark-input\">".to_string(),
            button_holder: "<nav class=\"hark-buttons\">{{buttons}}</nav>".to_string(),
            ok_button: "<button class=\"hark-button hark-button-ok\" id=\"hark-ok\">{{ok}}</button>".to_string(),
            cancel_button: "<button class=\"hark-button hark-button-cancel\" id=\"hark-cancel\">{{cancel}}</button>".to_string(),
            log_entry: "<article class=\"hark-log{{category}}\">{{message}}</article>".to_string(),
        }
    }
}

/// Widget configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Button labels
    pub labels: Labels,

    /// How long a log entry stays up before its removal is due
    pub delay: Duration,

    /// Lag between inserting a log entry and tagging it shown, so the host
    /// can attach the element before its enter animation class lands
    pub reveal_delay: Duration,

    /// Markup fragment templates
    pub templates: Templates,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            labels: Labels::default(),
            delay: Duration::from_millis(5000),
            reveal_delay: Duration::from_millis(50),
            templates: Templates::default(),
        }
    }
}
