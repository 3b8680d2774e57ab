//! Modal dialog subsystem: request types, queue, controller, renderer and
//! event bindings.
//!
//! A dialog request carries its kind, its message and a responder that is
//! invoked exactly once with the outcome. Requests are processed strictly in
//! submission order; at most one is visible at a time.

pub(crate) mod bindings;
pub(crate) mod controller;
pub(crate) mod queue;
pub mod renderer;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tokio::sync::oneshot;
use uuid::Uuid;

/// The three dialog shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    /// Message with a single OK control
    Alert,
    /// Message with OK and Cancel controls
    Confirm,
    /// Message, a single-line text input, and OK and Cancel controls
    Prompt,
}

impl DialogKind {
    /// Recognized kind names, in the order they parse
    pub const NAMES: [&'static str; 3] = ["alert", "confirm", "prompt"];

    /// Whether this kind renders a Cancel control
    pub fn has_cancel(self) -> bool {
        matches!(self, Self::Confirm | Self::Prompt)
    }

    /// Whether this kind renders a text input
    pub fn has_input(self) -> bool {
        matches!(self, Self::Prompt)
    }

    /// Lowercase kind name used in class tags and event payloads
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alert => "alert",
            Self::Confirm => "confirm",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DialogKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alert" => Ok(Self::Alert),
            "confirm" => Ok(Self::Confirm),
            "prompt" => Ok(Self::Prompt),
            other => Err(Error::UnknownDialogKind(other.to_string())),
        }
    }
}

/// What the user decided.
///
/// `value` carries the prompt input's text on a confirmed prompt and is
/// `None` everywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogOutcome {
    /// `true` for the OK path, `false` for the Cancel path
    pub confirmed: bool,

    /// Prompt input text, read from the host when OK fired
    pub value: Option<String>,
}

impl DialogOutcome {
    /// Outcome for the OK path
    pub fn confirmed(value: Option<String>) -> Self {
        Self {
            confirmed: true,
            value,
        }
    }

    /// Outcome for the Cancel path
    pub fn cancelled() -> Self {
        Self {
            confirmed: false,
            value: None,
        }
    }
}

/// How a resolved outcome reaches the caller
pub(crate) enum Responder {
    /// Caller-supplied callback
    Callback(Box<dyn FnOnce(DialogOutcome) + Send>),
    /// Oneshot backing a [`DialogTicket`]
    Channel(oneshot::Sender<DialogOutcome>),
}

impl Responder {
    /// Hand the outcome to the caller. A dropped ticket receiver is fine;
    /// that is the "no callback" case.
    pub(crate) fn deliver(self, outcome: DialogOutcome) {
        match self {
            Self::Callback(callback) => callback(outcome),
            Self::Channel(sender) => {
                let _ = sender.send(outcome);
            }
        }
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Callback(_) => f.write_str("Responder::Callback"),
            Self::Channel(_) => f.write_str("Responder::Channel"),
        }
    }
}

/// A queued dialog request. Owned by the queue from submission until its
/// outcome is resolved and the corresponding markup is dismissed.
#[derive(Debug)]
pub(crate) struct PendingDialog {
    pub(crate) id: Uuid,
    pub(crate) kind: DialogKind,
    pub(crate) message: String,
    /// Taken exactly once at resolution
    pub(crate) responder: Option<Responder>,
}

impl PendingDialog {
    pub(crate) fn new(kind: DialogKind, message: String, responder: Responder) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message,
            responder: Some(responder),
        }
    }
}

/// Awaitable handle for a submitted dialog request.
///
/// Dropping the ticket is allowed and simply discards the outcome, mirroring
/// a request made without a callback.
#[derive(Debug)]
pub struct DialogTicket {
    id: Uuid,
    rx: oneshot::Receiver<DialogOutcome>,
}

impl DialogTicket {
    pub(crate) fn new(id: Uuid, rx: oneshot::Receiver<DialogOutcome>) -> Self {
        Self { id, rx }
    }

    /// Id of the queued request this ticket belongs to
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Wait for the user's decision
    pub async fn outcome(self) -> crate::error::Result<DialogOutcome> {
        self.rx.await.map_err(|_| Error::SessionClosed)
    }
}
