use crate::error::{MentorlyError, Result};
use serde::Serialize;

/// Label shown on a save control while its request is in flight.
pub const SAVING_LABEL: &str = "Saving...";

/// A button that is disabled and relabelled while its request runs.
///
/// Holding the busy flag is what serializes repeated submissions: a second
/// `begin` while busy fails without touching the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionControl {
    idle_label: &'static str,
    busy_label: &'static str,
    busy: bool,
    visible: bool,
}

impl ActionControl {
    pub fn new(idle_label: &'static str, busy_label: &'static str) -> Self {
        Self {
            idle_label,
            busy_label,
            busy: false,
            visible: true,
        }
    }

    /// A save control labelled `idle_label`, showing "Saving..." while busy.
    pub fn save(idle_label: &'static str) -> Self {
        Self::new(idle_label, SAVING_LABEL)
    }

    pub fn label(&self) -> &'static str {
        if self.busy {
            self.busy_label
        } else {
            self.idle_label
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn is_enabled(&self) -> bool {
        !self.busy
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Marks the control busy for the duration of a request.
    pub fn begin(&mut self) -> Result<()> {
        if self.busy {
            return Err(MentorlyError::invalid_state(format!(
                "'{}' is already in progress",
                self.idle_label
            )));
        }
        self.busy = true;
        Ok(())
    }

    /// Re-enables the control and restores its label.
    pub fn finish(&mut self) {
        self.busy = false;
    }
}
