use crate::domain::HistoryEntry;

/// Append-only command log. Entries are never deduplicated or rewritten;
/// the whole log is dropped at once by `clear`.
#[derive(Clone, Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn command_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|entry| entry.command.as_str())
    }
}

/// Result of moving the recall cursor: either load a previous command into
/// the input buffer, wipe the buffer (stepped past the newest entry), or
/// leave everything alone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecallStep {
    Load(String),
    ClearBuffer,
    Unchanged,
}

/// Cursor into the submitted-command list, mirroring shell history browsing:
/// back from the unset position jumps to the newest entry, repeated back
/// walks toward the oldest and stops there, forward walks toward the newest
/// and unsets past it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RecallCursor {
    index: Option<usize>,
}

impl RecallCursor {
    pub fn is_unset(&self) -> bool {
        self.index.is_none()
    }

    pub fn reset(&mut self) {
        self.index = None;
    }

    pub fn back(&mut self, history: &History) -> RecallStep {
        if history.is_empty() {
            return RecallStep::Unchanged;
        }

        let next = match self.index {
            None => history.len() - 1,
            Some(0) => 0,
            Some(index) => index - 1,
        };
        self.index = Some(next);
        match history.command_at(next) {
            Some(command) => RecallStep::Load(command.to_string()),
            None => RecallStep::Unchanged,
        }
    }

    pub fn forward(&mut self, history: &History) -> RecallStep {
        let Some(index) = self.index else {
            return RecallStep::Unchanged;
        };

        if index + 1 >= history.len() {
            self.index = None;
            return RecallStep::ClearBuffer;
        }

        self.index = Some(index + 1);
        match history.command_at(index + 1) {
            Some(command) => RecallStep::Load(command.to_string()),
            None => RecallStep::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(commands: &[&str]) -> History {
        let mut history = History::default();
        for command in commands {
            history.push(HistoryEntry::new(*command, "ok"));
        }
        history
    }

    #[test]
    fn back_twice_selects_second_newest() {
        let history = history_of(&["a", "b", "c"]);
        let mut cursor = RecallCursor::default();

        assert_eq!(cursor.back(&history), RecallStep::Load("c".to_string()));
        assert_eq!(cursor.back(&history), RecallStep::Load("b".to_string()));
    }

    #[test]
    fn forward_past_newest_clears_buffer_and_unsets() {
        let history = history_of(&["a", "b", "c"]);
        let mut cursor = RecallCursor::default();

        cursor.back(&history);
        cursor.back(&history);
        assert_eq!(cursor.forward(&history), RecallStep::Load("c".to_string()));
        assert_eq!(cursor.forward(&history), RecallStep::ClearBuffer);
        assert!(cursor.is_unset());
    }

    #[test]
    fn back_stops_at_oldest_without_wrapping() {
        let history = history_of(&["a", "b"]);
        let mut cursor = RecallCursor::default();

        cursor.back(&history);
        cursor.back(&history);
        assert_eq!(cursor.back(&history), RecallStep::Load("a".to_string()));
        assert_eq!(cursor.back(&history), RecallStep::Load("a".to_string()));
    }

    #[test]
    fn empty_history_is_inert() {
        let history = History::default();
        let mut cursor = RecallCursor::default();

        assert_eq!(cursor.back(&history), RecallStep::Unchanged);
        assert_eq!(cursor.forward(&history), RecallStep::Unchanged);
        assert!(cursor.is_unset());
    }

    #[test]
    fn forward_with_unset_cursor_is_unchanged() {
        let history = history_of(&["a"]);
        let mut cursor = RecallCursor::default();

        assert_eq!(cursor.forward(&history), RecallStep::Unchanged);
    }
}
