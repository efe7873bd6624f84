use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Default size of the conversation window. Bounds the prompt sent to the
/// completion service (cost and context-window control) at the expense of
/// long-term memory; that trade-off is deliberate.
pub const DEFAULT_MAX_TURNS: usize = 10;

pub const EMPTY_HISTORY: &str = "No conversation history yet.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in the conversation. Insertion order is chronological order;
/// a turn has no identity beyond its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

/// Bounded FIFO log of conversation turns plus an auxiliary preference map.
///
/// The preference map is part of the entity's contract but is not read by
/// the orchestration flow today; `clear` empties it together with the log.
#[derive(Clone, Debug)]
pub struct ConversationMemory {
    turns: VecDeque<Turn>,
    preferences: HashMap<String, String>,
    max_turns: usize,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TURNS)
    }
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(max_turns.max(1)),
            preferences: HashMap::new(),
            max_turns: max_turns.max(1),
        }
    }

    /// Appends a turn, evicting the single oldest turn when the window would
    /// overflow. Strict head-drop: surviving turns keep their order. Never
    /// fails.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push_back(Turn { role, content: content.into() });
        while self.turns.len() > self.max_turns {
            self.turns.pop_front();
        }
    }

    /// Renders the transcript: `role: content` lines in chronological order,
    /// or the fixed empty-history sentence.
    pub fn conversation_history(&self) -> String {
        if self.turns.is_empty() {
            return EMPTY_HISTORY.to_string();
        }

        self.turns
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// No-op when `value` is empty.
    pub fn update_preference(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.preferences.insert(key.into(), value);
    }

    pub fn has_preference(&self, key: &str) -> bool {
        self.preferences.contains_key(key)
    }

    pub fn preference(&self, key: &str, default: &str) -> String {
        self.preferences.get(key).cloned().unwrap_or_else(|| default.to_string())
    }

    /// Empties both the turn log and the preference map.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.preferences.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::{ConversationMemory, Role, EMPTY_HISTORY};

    #[test]
    fn empty_memory_renders_fixed_sentence() {
        let memory = ConversationMemory::default();
        assert_eq!(memory.conversation_history(), EMPTY_HISTORY);
    }

    #[test]
    fn transcript_renders_role_prefixed_lines_in_order() {
        let mut memory = ConversationMemory::default();
        memory.add_message(Role::User, "beach trip to Greece");
        memory.add_message(Role::Assistant, "{\"summary\":\"Crete\"}");

        assert_eq!(
            memory.conversation_history(),
            "user: beach trip to Greece\nassistant: {\"summary\":\"Crete\"}"
        );
    }

    #[test]
    fn turn_count_is_bounded_by_window_size() {
        let mut memory = ConversationMemory::default();
        for n in 1..=7 {
            memory.add_message(Role::User, n.to_string());
        }
        assert_eq!(memory.len(), 7);

        for n in 8..=25 {
            memory.add_message(Role::User, n.to_string());
        }
        assert_eq!(memory.len(), 10);
    }

    #[test]
    fn eviction_drops_oldest_and_preserves_order() {
        let mut memory = ConversationMemory::default();
        for n in 1..=11 {
            memory.add_message(Role::User, n.to_string());
        }

        let contents: Vec<&str> = memory.turns().map(|turn| turn.content.as_str()).collect();
        assert_eq!(contents, vec!["2", "3", "4", "5", "6", "7", "8", "9", "10", "11"]);
        assert!(!contents.contains(&"1"));
    }

    #[test]
    fn window_size_of_one_keeps_only_latest_turn() {
        let mut memory = ConversationMemory::new(1);
        memory.add_message(Role::User, "first");
        memory.add_message(Role::User, "second");

        assert_eq!(memory.len(), 1);
        assert_eq!(memory.conversation_history(), "user: second");
    }

    #[test]
    fn empty_preference_value_is_ignored() {
        let mut memory = ConversationMemory::default();
        memory.update_preference("budget", "");
        memory.update_preference("budget", "   ");
        assert!(!memory.has_preference("budget"));

        memory.update_preference("budget", "mid-range");
        assert!(memory.has_preference("budget"));
        assert_eq!(memory.preference("budget", "none"), "mid-range");
        assert_eq!(memory.preference("dates", "flexible"), "flexible");
    }

    #[test]
    fn clear_empties_turns_and_preferences() {
        let mut memory = ConversationMemory::default();
        memory.add_message(Role::User, "hello");
        memory.update_preference("style", "luxury");

        memory.clear();

        assert!(memory.is_empty());
        assert!(!memory.has_preference("style"));
        assert_eq!(memory.conversation_history(), EMPTY_HISTORY);
    }
}
