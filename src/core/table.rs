//! Transition records and the ordered table that matches them.

use super::state::{Event, State};

/// A rule moving the machine from `from` to `to` when `event` arrives.
///
/// `C` is the callback type of the engine the transition belongs to, see
/// [`AsyncAction`](crate::engine::AsyncAction) and
/// [`SyncAction`](crate::engine::SyncAction).
pub struct Transition<S, E, C> {
    pub from: S,
    pub event: E,
    pub to: S,
    pub callback: Option<C>,
}

impl<S: State, E: Event, C> Transition<S, E, C> {
    /// Create a transition without a callback.
    pub fn new(from: S, event: E, to: S) -> Self {
        Self {
            from,
            event,
            to,
            callback: None,
        }
    }

    /// Attach a callback that has already been wrapped for its engine.
    pub fn with_callback(mut self, callback: C) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Check whether this rule fires for `event` in `state` (pure).
    pub fn matches(&self, state: &S, event: &E) -> bool {
        self.from == *state && self.event == *event
    }
}

impl<S: Clone, E: Clone, C: Clone> Clone for Transition<S, E, C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            event: self.event.clone(),
            to: self.to.clone(),
            callback: self.callback.clone(),
        }
    }
}

impl<S: State, E: Event, C> std::fmt::Debug for Transition<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transition")
            .field("from", &self.from)
            .field("event", &self.event)
            .field("to", &self.to)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Ordered list of transitions.
///
/// Order matters twice: the first matching rule wins, and diagrams list
/// edges in insertion order. Several rules may share a `(from, event)` pair;
/// only the first is ever selected.
pub struct TransitionTable<S, E, C> {
    transitions: Vec<Transition<S, E, C>>,
}

impl<S: State, E: Event, C> TransitionTable<S, E, C> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append transitions after the existing ones.
    pub fn append<I>(&mut self, transitions: I)
    where
        I: IntoIterator<Item = Transition<S, E, C>>,
    {
        self.transitions.extend(transitions);
    }

    /// First transition leaving `state` on `event`.
    pub fn find(&self, state: &S, event: &E) -> Option<&Transition<S, E, C>> {
        self.transitions.iter().find(|t| t.matches(state, event))
    }

    pub fn can_fire(&self, state: &S, event: &E) -> bool {
        self.find(state, event).is_some()
    }

    /// Target of the transition `find` would select, without firing it.
    pub fn next_state(&self, state: &S, event: &E) -> Option<&S> {
        self.find(state, event).map(|t| &t.to)
    }

    /// True when no transition leaves `state`.
    pub fn is_terminal(&self, state: &S) -> bool {
        self.transitions.iter().all(|t| t.from != *state)
    }

    /// States that are entered but never left, in order of first appearance
    /// as a target.
    pub fn terminal_states(&self) -> Vec<&S> {
        let mut terminal: Vec<&S> = Vec::new();
        for t in &self.transitions {
            if !terminal.contains(&&t.to) && self.is_terminal(&t.to) {
                terminal.push(&t.to);
            }
        }
        terminal
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transition<S, E, C>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

impl<S: State, E: Event, C> Default for TransitionTable<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, E: Event, C> FromIterator<Transition<S, E, C>> for TransitionTable<S, E, C> {
    fn from_iter<I: IntoIterator<Item = Transition<S, E, C>>>(iter: I) -> Self {
        Self {
            transitions: iter.into_iter().collect(),
        }
    }
}

impl<'a, S, E, C> IntoIterator for &'a TransitionTable<S, E, C> {
    type Item = &'a Transition<S, E, C>;
    type IntoIter = std::slice::Iter<'a, Transition<S, E, C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.transitions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Table = TransitionTable<String, String, u8>;

    fn s(label: &str) -> String {
        label.to_string()
    }

    fn door() -> Table {
        [
            Transition::new(s("closed"), s("open"), s("opening")),
            Transition::new(s("opening"), s("openComplete"), s("opened")),
            Transition::new(s("opened"), s("close"), s("closing")),
            Transition::new(s("closing"), s("closeComplete"), s("closed")),
            Transition::new(s("opened"), s("break"), s("breaking")),
            Transition::new(s("breaking"), s("breakComplete"), s("broken")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn find_returns_matching_rule() {
        let table = door();
        let found = table.find(&s("closed"), &s("open")).unwrap();
        assert_eq!(found.to, "opening");
        assert!(table.find(&s("closed"), &s("close")).is_none());
    }

    #[test]
    fn first_matching_rule_wins() {
        let mut table = door();
        table.append([
            Transition::new(s("closed"), s("open"), s("jammed")).with_callback(7),
        ]);

        let found = table.find(&s("closed"), &s("open")).unwrap();
        assert_eq!(found.to, "opening");
        assert!(found.callback.is_none());
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn can_fire_agrees_with_find() {
        let table = door();
        assert!(table.can_fire(&s("opened"), &s("break")));
        assert!(!table.can_fire(&s("closed"), &s("break")));
    }

    #[test]
    fn next_state_is_pure_lookup() {
        let table = door();
        assert_eq!(table.next_state(&s("opened"), &s("close")), Some(&s("closing")));
        assert_eq!(table.next_state(&s("broken"), &s("open")), None);
    }

    #[test]
    fn terminal_means_no_outgoing_edge() {
        let table = door();
        assert!(table.is_terminal(&s("broken")));
        assert!(!table.is_terminal(&s("closed")));
        assert!(table.is_terminal(&s("nowhere")));
    }

    #[test]
    fn terminal_states_follow_first_appearance() {
        let mut table = door();
        table.append([
            Transition::new(s("closed"), s("melt"), s("puddle")),
            Transition::new(s("opened"), s("break"), s("broken")),
        ]);

        assert_eq!(table.terminal_states(), vec![&s("broken"), &s("puddle")]);
    }

    #[test]
    fn empty_table_has_no_terminals() {
        let table = Table::new();
        assert!(table.is_empty());
        assert!(table.terminal_states().is_empty());
        assert!(table.is_terminal(&s("anything")));
    }

    #[test]
    fn append_preserves_order() {
        let mut table = Table::new();
        table.append([Transition::new(s("a"), s("go"), s("b"))]);
        table.append([Transition::new(s("b"), s("go"), s("c"))]);

        let targets: Vec<&str> = table.iter().map(|t| t.to.as_str()).collect();
        assert_eq!(targets, vec!["b", "c"]);
    }
}
