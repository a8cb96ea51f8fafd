//! Form and delete-confirmation state machines.
//!
//! The dashboard drives every entity form through a [`FormFlow`] and every
//! destructive action through a [`DeleteFlow`]. Transitions that make no
//! sense (submitting twice, deleting without confirming) return
//! [`FlowError`] instead of silently changing state.

use serde::{Deserialize, Serialize};

use crate::resource::{GENERIC_ERROR_MESSAGE, ResourceKind};

/// Whether a form creates a new record or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    /// Page heading, e.g. `"Create billboard"`.
    #[must_use]
    pub fn title(self, kind: ResourceKind) -> String {
        match self {
            Self::Create => format!("Create {}", kind.singular()),
            Self::Edit => format!("Edit {}", kind.singular()),
        }
    }

    /// Page subtitle, e.g. `"Add a new billboard"`.
    #[must_use]
    pub fn description(self, kind: ResourceKind) -> String {
        match self {
            Self::Create => format!("Add a new {}", kind.singular()),
            Self::Edit => format!("Edit a {}", kind.singular()),
        }
    }

    /// Submit button label.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Edit => "Save changes",
        }
    }

    /// Notice shown after a successful submit.
    #[must_use]
    pub fn toast(self, kind: ResourceKind) -> String {
        match self {
            Self::Create => kind.created_message(),
            Self::Edit => kind.updated_message(),
        }
    }

    /// Only existing records can be deleted from their form.
    #[must_use]
    pub const fn offers_delete(self) -> bool {
        matches!(self, Self::Edit)
    }
}

/// A user-facing notice, carried across redirects as a flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    /// Generic failure notice.
    #[must_use]
    pub fn generic_error() -> Self {
        Self::Error(GENERIC_ERROR_MESSAGE.to_owned())
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Success(message) | Self::Error(message) => message,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// An illegal state-machine transition.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot {event} while {state}")]
pub struct FlowError {
    pub state: &'static str,
    pub event: &'static str,
}

/// States of an entity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Editable, waiting for the user.
    Idle,
    /// A submission is in flight.
    Submitting,
    /// Persisted; the user is being sent back to the list.
    Submitted,
}

impl FormState {
    const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

/// One form session: `Idle -> Submitting -> Idle | Submitted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormFlow {
    kind: ResourceKind,
    mode: FormMode,
    state: FormState,
}

impl FormFlow {
    #[must_use]
    pub const fn new(kind: ResourceKind, mode: FormMode) -> Self {
        Self {
            kind,
            mode,
            state: FormState::Idle,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub const fn mode(&self) -> FormMode {
        self.mode
    }

    #[must_use]
    pub const fn state(&self) -> FormState {
        self.state
    }

    /// Start a submission.
    ///
    /// # Errors
    ///
    /// Fails unless the form is idle.
    pub fn submit(&mut self) -> Result<(), FlowError> {
        self.transition(FormState::Idle, FormState::Submitting, "submit")
    }

    /// The write was persisted. Returns the success notice.
    ///
    /// # Errors
    ///
    /// Fails unless a submission is in flight.
    pub fn succeed(&mut self) -> Result<Notice, FlowError> {
        self.transition(FormState::Submitting, FormState::Submitted, "succeed")?;
        Ok(Notice::Success(self.mode.toast(self.kind)))
    }

    /// The submission failed validation; the form becomes editable again and
    /// shows field messages instead of a notice.
    ///
    /// # Errors
    ///
    /// Fails unless a submission is in flight.
    pub fn reject(&mut self) -> Result<(), FlowError> {
        self.transition(FormState::Submitting, FormState::Idle, "reject")
    }

    /// The write failed; the form becomes editable again. Returns the
    /// generic error notice.
    ///
    /// # Errors
    ///
    /// Fails unless a submission is in flight.
    pub fn fail(&mut self) -> Result<Notice, FlowError> {
        self.transition(FormState::Submitting, FormState::Idle, "fail")?;
        Ok(Notice::generic_error())
    }

    fn transition(
        &mut self,
        from: FormState,
        to: FormState,
        event: &'static str,
    ) -> Result<(), FlowError> {
        if self.state != from {
            return Err(FlowError {
                state: self.state.name(),
                event,
            });
        }
        self.state = to;
        Ok(())
    }
}

/// Delete confirmation: `Closed -> Open -> Deleting -> Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteFlow {
    #[default]
    Closed,
    /// Confirmation shown.
    Open,
    Deleting,
}

impl DeleteFlow {
    const fn name(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::Deleting => "deleting",
        }
    }

    /// Show the confirmation.
    ///
    /// # Errors
    ///
    /// Fails unless closed.
    pub fn open(&mut self) -> Result<(), FlowError> {
        self.transition(Self::Closed, Self::Open, "open")
    }

    /// The user confirmed; the delete is in flight.
    ///
    /// # Errors
    ///
    /// Fails unless open.
    pub fn confirm(&mut self) -> Result<(), FlowError> {
        self.transition(Self::Open, Self::Deleting, "confirm")
    }

    /// The delete finished. `Ok` carries the success message, `Err` the
    /// failure message (usually the entity's conflict message).
    ///
    /// # Errors
    ///
    /// Fails unless a delete is in flight.
    pub fn finish(&mut self, outcome: Result<String, String>) -> Result<Notice, FlowError> {
        self.transition(Self::Deleting, Self::Closed, "finish")?;
        Ok(match outcome {
            Ok(message) => Notice::Success(message),
            Err(message) => Notice::Error(message),
        })
    }

    fn transition(&mut self, from: Self, to: Self, event: &'static str) -> Result<(), FlowError> {
        if *self != from {
            return Err(FlowError {
                state: self.name(),
                event,
            });
        }
        *self = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_labels() {
        let kind = ResourceKind::Billboards;
        assert_eq!(FormMode::Create.title(kind), "Create billboard");
        assert_eq!(FormMode::Edit.title(kind), "Edit billboard");
        assert_eq!(FormMode::Create.description(kind), "Add a new billboard");
        assert_eq!(FormMode::Edit.description(kind), "Edit a billboard");
        assert_eq!(FormMode::Create.action(), "Create");
        assert_eq!(FormMode::Edit.action(), "Save changes");
        assert!(!FormMode::Create.offers_delete());
        assert!(FormMode::Edit.offers_delete());
    }

    #[test]
    fn test_form_success_path() {
        let mut flow = FormFlow::new(ResourceKind::Billboards, FormMode::Create);
        assert_eq!(flow.state(), FormState::Idle);
        flow.submit().expect("idle form submits");
        assert_eq!(flow.state(), FormState::Submitting);
        let notice = flow.succeed().expect("in flight");
        assert_eq!(notice, Notice::Success("Billboard created".to_string()));
        assert_eq!(flow.state(), FormState::Submitted);
    }

    #[test]
    fn test_form_failure_returns_to_idle() {
        let mut flow = FormFlow::new(ResourceKind::Colors, FormMode::Edit);
        flow.submit().expect("submit");
        let notice = flow.fail().expect("in flight");
        assert_eq!(notice, Notice::Error("Something went wrong.".to_string()));
        assert_eq!(flow.state(), FormState::Idle);

        flow.submit().expect("resubmit after failure");
        flow.reject().expect("validation failure");
        assert_eq!(flow.state(), FormState::Idle);
    }

    #[test]
    fn test_form_rejects_illegal_transitions() {
        let mut flow = FormFlow::new(ResourceKind::Sizes, FormMode::Create);
        assert!(flow.succeed().is_err());
        flow.submit().expect("submit");
        let err = flow.submit().expect_err("double submit");
        assert_eq!(err.to_string(), "cannot submit while submitting");
        flow.succeed().expect("succeed");
        assert!(flow.submit().is_err());
    }

    #[test]
    fn test_delete_flow() {
        let mut flow = DeleteFlow::default();
        assert!(flow.confirm().is_err());
        flow.open().expect("open");
        assert!(flow.open().is_err());
        flow.confirm().expect("confirm");
        assert_eq!(flow, DeleteFlow::Deleting);
        let notice = flow
            .finish(Err(ResourceKind::Billboards.conflict_message()))
            .expect("finish");
        assert!(notice.is_error());
        assert_eq!(flow, DeleteFlow::Closed);
    }

    #[test]
    fn test_notice_serialization() {
        let json = serde_json::to_value(Notice::Success("Size deleted.".to_string()))
            .expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({"kind": "success", "message": "Size deleted."})
        );
    }
}
