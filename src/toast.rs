//! Toast Notifications
//!
//! Fire-and-forget status messages. Each toast enters, stays for its
//! duration, leaves, and is removed; any number can be on screen at once.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Warning => "toast-warning",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    /// Inserted, transition not started yet
    Entering,
    Visible,
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    pub phase: ToastPhase,
}

impl Toast {
    pub fn class(&self) -> String {
        let mut c = format!("toast {}", self.kind.css_class());
        if self.phase == ToastPhase::Visible {
            c.push_str(" show");
        }
        c
    }
}

/// All toasts currently on screen, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Toasts {
    next_id: u64,
    items: Vec<Toast>,
}

impl Toasts {
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            kind,
            message: message.into(),
            phase: ToastPhase::Entering,
        });
        id
    }

    pub fn show(&mut self, id: u64) {
        self.set_phase(id, ToastPhase::Visible);
    }

    pub fn dismiss(&mut self, id: u64) {
        self.set_phase(id, ToastPhase::Leaving);
    }

    pub fn remove(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }

    fn set_phase(&mut self, id: u64, phase: ToastPhase) {
        if let Some(t) = self.items.iter_mut().find(|t| t.id == id) {
            t.phase = phase;
        }
    }
}

/// Timing for the toast lifecycle, in milliseconds
#[derive(Clone, Copy, Debug)]
pub struct ToastTiming {
    pub enter_delay_ms: u32,
    pub duration_ms: u32,
    pub exit_ms: u32,
}

/// Handle for raising toasts; cheap to copy into handlers
#[derive(Clone, Copy)]
pub struct Toaster {
    toasts: RwSignal<Toasts>,
    timing: ToastTiming,
}

impl Toaster {
    pub fn new(timing: ToastTiming) -> Self {
        Self {
            toasts: RwSignal::new(Toasts::default()),
            timing,
        }
    }

    pub fn toasts(&self) -> RwSignal<Toasts> {
        self.toasts
    }

    pub fn info(&self, message: impl Into<String>) {
        self.notify(ToastKind::Info, message, None);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(ToastKind::Success, message, None);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(ToastKind::Warning, message, None);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(ToastKind::Error, message, None);
    }

    /// Raise a toast; `duration_ms` overrides the default for this one
    pub fn notify(&self, kind: ToastKind, message: impl Into<String>, duration_ms: Option<u32>) {
        let toasts = self.toasts;
        let ToastTiming { enter_delay_ms, exit_ms, .. } = self.timing;
        let duration = duration_ms.unwrap_or(self.timing.duration_ms);

        let mut id = 0;
        toasts.update(|t| id = t.push(kind, message));

        Timeout::new(enter_delay_ms, move || toasts.update(|t| t.show(id))).forget();
        Timeout::new(enter_delay_ms + duration, move || {
            toasts.update(|t| t.dismiss(id));
            Timeout::new(exit_ms, move || toasts.update(|t| t.remove(id))).forget();
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_phases() {
        let mut toasts = Toasts::default();
        let id = toasts.push(ToastKind::Success, "Saved");
        assert_eq!(toasts.items()[0].phase, ToastPhase::Entering);
        assert_eq!(toasts.items()[0].class(), "toast toast-success");

        toasts.show(id);
        assert_eq!(toasts.items()[0].class(), "toast toast-success show");

        toasts.dismiss(id);
        assert_eq!(toasts.items()[0].phase, ToastPhase::Leaving);

        toasts.remove(id);
        assert!(toasts.items().is_empty());
    }

    #[test]
    fn test_toasts_are_independent() {
        let mut toasts = Toasts::default();
        let a = toasts.push(ToastKind::Error, "Could not save");
        let b = toasts.push(ToastKind::Error, "Could not save");
        assert_ne!(a, b);
        assert_eq!(toasts.items().len(), 2);

        toasts.remove(a);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].id, b);
    }

    #[test]
    fn test_unknown_id_is_ignored() {
        let mut toasts = Toasts::default();
        toasts.push(ToastKind::Info, "hello");
        toasts.dismiss(42);
        toasts.remove(42);
        assert_eq!(toasts.items()[0].phase, ToastPhase::Entering);
    }
}
