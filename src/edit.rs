//! Edit Session
//!
//! State machine for inline card editing: at most one card is edited at a
//! time, each save gets a ticket, and only the latest ticket may land.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::models::{Card, CardId};

/// Tickets are unique across sessions, so a re-opened card never mistakes
/// an older session's response for its own
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

fn next_ticket() -> u64 {
    NEXT_TICKET.fetch_add(1, Ordering::Relaxed)
}

/// The editable fields of a card
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CardFields {
    pub title: String,
    pub notes: String,
}

impl CardFields {
    pub fn new(title: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: notes.into(),
        }
    }

    pub fn from_card(card: &Card) -> Self {
        Self::new(card.title.clone(), card.notes.clone())
    }

    pub fn trimmed(&self) -> Self {
        Self::new(self.title.trim(), self.notes.trim())
    }

    pub fn apply_to(&self, card: &mut Card) {
        card.title.clone_from(&self.title);
        card.notes.clone_from(&self.notes);
    }
}

/// What asked for the save
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveTrigger {
    /// Enter key or save button
    Manual,
    /// Focus left the card's fields
    Blur,
    /// Debounced typing pause
    Auto,
    /// Another card is entering edit mode
    Switch,
}

impl SaveTrigger {
    /// Only a manual save reports an empty title to the user
    pub fn is_interactive(self) -> bool {
        matches!(self, SaveTrigger::Manual)
    }

    /// Auto-save keeps editing; everything else leaves edit mode on success
    pub fn ends_session(self) -> bool {
        !matches!(self, SaveTrigger::Auto)
    }
}

/// Result of planning a save
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SavePlan {
    /// Issue the update with these (trimmed) fields
    Send { ticket: u64, fields: CardFields },
    /// Title is blank after trimming; nothing is sent
    EmptyTitle,
    /// Nothing changed since the last confirmed save
    Unchanged,
    /// A save is already on its way and this trigger does not supersede it
    Busy,
}

/// Result of a save response landing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A newer save was issued after this one; ignore the response
    Stale,
    /// The session is gone (cancelled, deleted or switched away); the
    /// response is still the server's truth for the card
    Detached,
    Saved { ends_session: bool },
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct PendingSave {
    ticket: u64,
    trigger: SaveTrigger,
    fields: CardFields,
}

/// The one card currently being edited
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSession {
    pub card_id: CardId,
    synced: CardFields,
    draft: CardFields,
    pending: Option<PendingSave>,
    /// Background save that found another one in flight
    queued: Option<SaveTrigger>,
    focus_requests: u32,
}

impl EditSession {
    pub fn begin(card: &Card) -> Self {
        let fields = CardFields::from_card(card);
        Self {
            card_id: card.id,
            synced: fields.clone(),
            draft: fields,
            pending: None,
            queued: None,
            focus_requests: 0,
        }
    }

    pub fn draft(&self) -> &CardFields {
        &self.draft
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.draft.notes = notes.into();
    }

    /// A save request is in flight
    pub fn is_saving(&self) -> bool {
        self.pending.is_some()
    }

    /// Bumped whenever the title input should grab focus again
    pub fn focus_requests(&self) -> u32 {
        self.focus_requests
    }

    pub fn request_focus(&mut self) {
        self.focus_requests = self.focus_requests.wrapping_add(1);
    }

    /// Auto-save fires only for a non-blank title that differs from the last synced one
    pub fn wants_autosave(&self) -> bool {
        let title = self.draft.title.trim();
        !title.is_empty() && title != self.synced.title.trim()
    }

    pub fn plan_save(&mut self, trigger: SaveTrigger) -> SavePlan {
        let fields = self.draft.trimmed();
        if fields.title.is_empty() {
            return SavePlan::EmptyTitle;
        }
        if self.pending.is_some() && matches!(trigger, SaveTrigger::Auto | SaveTrigger::Blur) {
            // Blur outranks auto: it also ends the session
            if self.queued != Some(SaveTrigger::Blur) {
                self.queued = Some(trigger);
            }
            return SavePlan::Busy;
        }
        let changed = match trigger {
            SaveTrigger::Auto => self.wants_autosave(),
            _ => fields != self.synced.trimmed(),
        };
        if !changed {
            return SavePlan::Unchanged;
        }
        let ticket = next_ticket();
        self.queued = None;
        self.pending = Some(PendingSave {
            ticket,
            trigger,
            fields: fields.clone(),
        });
        SavePlan::Send { ticket, fields }
    }

    /// Record the server's answer for `ticket`
    pub fn complete(&mut self, ticket: u64, ok: bool) -> SaveOutcome {
        if self.pending.as_ref().map(|p| p.ticket) != Some(ticket) {
            return SaveOutcome::Stale;
        }
        let Some(pending) = self.pending.take() else {
            return SaveOutcome::Stale;
        };
        if !ok {
            return SaveOutcome::Failed;
        }
        self.synced = pending.fields;
        SaveOutcome::Saved {
            ends_session: pending.trigger.ends_session(),
        }
    }

    /// The save that was turned away as `Busy`, once nothing is in flight
    pub fn take_queued(&mut self) -> Option<SaveTrigger> {
        if self.pending.is_some() {
            return None;
        }
        self.queued.take()
    }

    /// Leave edit mode without saving; hands back what the card shows again.
    /// That is the pre-edit text unless an auto-save already reached the server.
    pub fn cancel(self) -> CardFields {
        self.synced
    }
}

/// Land the response for `ticket` of `card_id` in whatever the edit slot holds now
pub fn land_save(slot: &mut Option<EditSession>, card_id: CardId, ticket: u64, ok: bool) -> SaveOutcome {
    match slot {
        Some(session) if session.card_id == card_id => session.complete(ticket, ok),
        _ => SaveOutcome::Detached,
    }
}

/// Point the edit slot at `card`, handing back the session being left.
/// Re-entering the card already being edited keeps its session.
pub fn switch_session(slot: &mut Option<EditSession>, card: &Card) -> Option<EditSession> {
    if slot.as_ref().is_some_and(|s| s.card_id == card.id) {
        return None;
    }
    slot.replace(EditSession::begin(card))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: u32, title: &str, notes: &str) -> Card {
        Card::new(id, title).with_notes(notes)
    }

    fn send(session: &mut EditSession, trigger: SaveTrigger) -> (u64, CardFields) {
        match session.plan_save(trigger) {
            SavePlan::Send { ticket, fields } => (ticket, fields),
            other => panic!("expected a send, got {:?}", other),
        }
    }

    #[test]
    fn test_begin_starts_from_card_text() {
        let session = EditSession::begin(&card(1, "Fix bug", ""));
        assert_eq!(session.card_id, 1);
        assert_eq!(session.draft(), &CardFields::new("Fix bug", ""));
        assert!(!session.is_saving());
    }

    #[test]
    fn test_cancel_restores_exact_original() {
        let mut session = EditSession::begin(&card(1, "  Fix bug ", "line one\nline two"));
        session.set_title("Something else");
        session.set_notes("");
        let restored = session.cancel();
        assert_eq!(restored.title, "  Fix bug ");
        assert_eq!(restored.notes, "line one\nline two");
    }

    #[test]
    fn test_cancel_after_autosave_keeps_saved_text() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        session.set_title("B");
        let SavePlan::Send { ticket, .. } = session.plan_save(SaveTrigger::Auto) else {
            panic!("expected a send");
        };
        session.complete(ticket, true);
        session.set_title("B and more");
        assert_eq!(session.cancel(), CardFields::new("B", ""));
    }

    #[test]
    fn test_blank_title_is_never_sent() {
        let mut session = EditSession::begin(&card(1, "Fix bug", ""));
        session.set_title("   ");
        for trigger in [SaveTrigger::Manual, SaveTrigger::Blur, SaveTrigger::Auto, SaveTrigger::Switch] {
            assert_eq!(session.plan_save(trigger), SavePlan::EmptyTitle);
        }
        assert!(!session.is_saving());
        assert!(SaveTrigger::Manual.is_interactive());
        assert!(!SaveTrigger::Auto.is_interactive());
    }

    #[test]
    fn test_blur_save_sends_trimmed_fields() {
        let mut session = EditSession::begin(&card(7, "Fix bug", ""));
        session.set_notes("urgent ");
        let (ticket, fields) = send(&mut session, SaveTrigger::Blur);
        assert_eq!(fields, CardFields::new("Fix bug", "urgent"));
        assert!(session.is_saving());
        assert_eq!(session.complete(ticket, true), SaveOutcome::Saved { ends_session: true });
        assert!(!session.is_saving());
    }

    #[test]
    fn test_autosave_only_when_title_differs_from_synced() {
        let mut session = EditSession::begin(&card(1, "Fix bug", ""));
        session.set_notes("only notes changed");
        assert!(!session.wants_autosave());
        assert_eq!(session.plan_save(SaveTrigger::Auto), SavePlan::Unchanged);

        session.set_title("Fix bug now");
        assert!(session.wants_autosave());
        let SavePlan::Send { ticket, fields } = session.plan_save(SaveTrigger::Auto) else {
            panic!("expected a send");
        };
        assert_eq!(fields.title, "Fix bug now");
        assert_eq!(session.complete(ticket, true), SaveOutcome::Saved { ends_session: false });

        // Synced now matches, so another pause does nothing
        assert!(!session.wants_autosave());
        assert_eq!(session.plan_save(SaveTrigger::Auto), SavePlan::Unchanged);
    }

    #[test]
    fn test_background_saves_wait_for_in_flight_save() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        session.set_title("B");
        assert!(matches!(session.plan_save(SaveTrigger::Manual), SavePlan::Send { .. }));
        session.set_title("C");
        assert_eq!(session.plan_save(SaveTrigger::Auto), SavePlan::Busy);
        assert_eq!(session.plan_save(SaveTrigger::Blur), SavePlan::Busy);
    }

    #[test]
    fn test_superseded_save_response_is_stale() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        session.set_title("B");
        let SavePlan::Send { ticket: first, .. } = session.plan_save(SaveTrigger::Auto) else {
            panic!("expected a send");
        };
        session.set_title("C");
        let SavePlan::Send { ticket: second, .. } = session.plan_save(SaveTrigger::Manual) else {
            panic!("expected a send");
        };
        assert_eq!(session.complete(first, true), SaveOutcome::Stale);
        assert!(session.is_saving());
        assert_eq!(session.complete(second, true), SaveOutcome::Saved { ends_session: true });
    }

    #[test]
    fn test_failed_save_keeps_editing() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        session.set_title("B");
        let SavePlan::Send { ticket, .. } = session.plan_save(SaveTrigger::Manual) else {
            panic!("expected a send");
        };
        assert_eq!(session.complete(ticket, false), SaveOutcome::Failed);
        assert!(!session.is_saving());
        assert_eq!(session.draft().title, "B");
        // Still dirty, so a retry sends again under a fresh ticket
        let (retry, _) = send(&mut session, SaveTrigger::Manual);
        assert_ne!(retry, ticket);
    }

    #[test]
    fn test_blur_during_autosave_runs_after_it_lands() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        session.set_title("B");
        let (ticket, _) = send(&mut session, SaveTrigger::Auto);

        session.set_notes("urgent");
        assert_eq!(session.plan_save(SaveTrigger::Blur), SavePlan::Busy);
        assert_eq!(session.plan_save(SaveTrigger::Auto), SavePlan::Busy);
        assert_eq!(session.take_queued(), None, "still in flight");

        assert_eq!(session.complete(ticket, true), SaveOutcome::Saved { ends_session: false });
        assert_eq!(session.take_queued(), Some(SaveTrigger::Blur));
        assert_eq!(session.take_queued(), None);

        let (_, fields) = send(&mut session, SaveTrigger::Blur);
        assert_eq!(fields, CardFields::new("B", "urgent"));
    }

    #[test]
    fn test_manual_save_drops_queued_background_save() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        session.set_title("B");
        send(&mut session, SaveTrigger::Auto);
        session.set_title("C");
        assert_eq!(session.plan_save(SaveTrigger::Auto), SavePlan::Busy);
        let (ticket, _) = send(&mut session, SaveTrigger::Manual);
        session.complete(ticket, true);
        assert_eq!(session.take_queued(), None);
    }

    #[test]
    fn test_response_after_session_ended_is_detached() {
        let a = card(1, "A", "");
        let mut slot = Some(EditSession::begin(&a));
        slot.as_mut().unwrap().set_title("B");
        let (ticket, _) = send(slot.as_mut().unwrap(), SaveTrigger::Auto);

        // Cancelled while the save was in flight
        slot.take().unwrap().cancel();
        assert_eq!(land_save(&mut slot, 1, ticket, true), SaveOutcome::Detached);

        // Re-opened: the old response belongs to no live save of the new session
        slot = Some(EditSession::begin(&a));
        slot.as_mut().unwrap().set_title("C");
        let (fresh, _) = send(slot.as_mut().unwrap(), SaveTrigger::Manual);
        assert_eq!(land_save(&mut slot, 1, ticket, true), SaveOutcome::Stale);
        assert!(slot.as_ref().unwrap().is_saving());
        assert_eq!(land_save(&mut slot, 1, fresh, true), SaveOutcome::Saved { ends_session: true });

        // Another card took the slot
        slot = Some(EditSession::begin(&card(2, "Other", "")));
        assert_eq!(land_save(&mut slot, 1, fresh, true), SaveOutcome::Detached);
    }

    #[test]
    fn test_trailing_space_in_server_title_is_not_a_change() {
        let mut session = EditSession::begin(&card(1, "Fix bug ", ""));
        assert!(!session.wants_autosave());
        assert_eq!(session.plan_save(SaveTrigger::Manual), SavePlan::Unchanged);

        session.set_notes("urgent");
        assert!(!session.wants_autosave());
        assert_eq!(session.plan_save(SaveTrigger::Auto), SavePlan::Unchanged);
        let (_, fields) = send(&mut session, SaveTrigger::Blur);
        assert_eq!(fields, CardFields::new("Fix bug", "urgent"));
    }

    #[test]
    fn test_switch_hands_back_previous_session() {
        let a = card(1, "A", "");
        let b = card(2, "B", "");
        let mut slot = None;
        assert!(switch_session(&mut slot, &a).is_none());
        slot.as_mut().unwrap().set_title("A edited");

        let previous = switch_session(&mut slot, &b).expect("A must be flushed");
        assert_eq!(previous.card_id, 1);
        assert_eq!(slot.as_ref().map(|s| s.card_id), Some(2));

        let mut previous = previous;
        assert!(matches!(previous.plan_save(SaveTrigger::Switch), SavePlan::Send { .. }));
    }

    #[test]
    fn test_switch_to_same_card_keeps_draft() {
        let a = card(1, "A", "");
        let mut slot = None;
        switch_session(&mut slot, &a);
        slot.as_mut().unwrap().set_title("A edited");
        assert!(switch_session(&mut slot, &a).is_none());
        assert_eq!(slot.unwrap().draft().title, "A edited");
    }

    #[test]
    fn test_focus_requests_increment() {
        let mut session = EditSession::begin(&card(1, "A", ""));
        let before = session.focus_requests();
        session.request_focus();
        assert_eq!(session.focus_requests(), before + 1);
    }
}
