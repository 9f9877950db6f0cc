//! Optimistic Updates
//!
//! Apply a mutation right away, keep a closure that undoes it, and settle
//! once the server has answered.

/// Undo closure for an optimistic mutation
pub struct Rollback<S> {
    undo: Option<Box<dyn FnOnce(&mut S)>>,
}

impl<S> Rollback<S> {
    pub fn new(undo: impl FnOnce(&mut S) + 'static) -> Self {
        Self {
            undo: Some(Box::new(undo)),
        }
    }

    /// Nothing to undo (the mutation did not apply)
    pub fn noop() -> Self {
        Self { undo: None }
    }

    pub fn is_noop(&self) -> bool {
        self.undo.is_none()
    }

    pub fn undo(self, state: &mut S) {
        if let Some(undo) = self.undo {
            undo(state);
        }
    }
}

/// Apply `mutate` to `state`; it returns the undo closure for what it did
pub fn apply<S>(state: &mut S, mutate: impl FnOnce(&mut S) -> Rollback<S>) -> Rollback<S> {
    mutate(state)
}

/// Keep the mutation on success, undo it on failure. The outcome passes through.
pub fn settle<S, T, E>(state: &mut S, rollback: Rollback<S>, outcome: Result<T, E>) -> Result<T, E> {
    if outcome.is_err() {
        rollback.undo(state);
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_keeps_mutation() {
        let mut state = vec![1, 2, 3];
        let rollback = apply(&mut state, |s| {
            let popped = s.pop();
            Rollback::new(move |s: &mut Vec<i32>| s.extend(popped))
        });
        let outcome: Result<(), String> = settle(&mut state, rollback, Ok(()));
        assert!(outcome.is_ok());
        assert_eq!(state, vec![1, 2]);
    }

    #[test]
    fn test_failure_undoes_mutation() {
        let mut state = vec![1, 2, 3];
        let rollback = apply(&mut state, |s| {
            let popped = s.pop();
            Rollback::new(move |s: &mut Vec<i32>| s.extend(popped))
        });
        let outcome: Result<(), &str> = settle(&mut state, rollback, Err("offline"));
        assert_eq!(outcome, Err("offline"));
        assert_eq!(state, vec![1, 2, 3]);
    }

    #[test]
    fn test_noop_rollback() {
        let mut state = 5;
        let rollback = Rollback::<i32>::noop();
        assert!(rollback.is_noop());
        let _ = settle::<_, (), _>(&mut state, rollback, Err(()));
        assert_eq!(state, 5);
    }
}
