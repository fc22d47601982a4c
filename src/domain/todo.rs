use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub created_at_rfc3339: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at_rfc3339: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TodoFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TodoFilter {
    /// Anything other than "pending"/"completed" lists everything.
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("pending") => Self::Pending,
            Some("completed") => Self::Completed,
            _ => Self::All,
        }
    }

    fn matches(self, item: &TodoItem) -> bool {
        match self {
            Self::All => true,
            Self::Pending => !item.completed,
            Self::Completed => item.completed,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Pending => "pending ",
            Self::Completed => "completed ",
        }
    }
}

/// Outcome of a todo operation: the text block to display, plus whether the
/// list changed and must be mirrored to storage.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TodoReply {
    pub text: String,
    pub changed: bool,
}

impl TodoReply {
    fn unchanged(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: false,
        }
    }

    fn changed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            changed: true,
        }
    }
}

/// Ordered todo list. Ids are monotonic and never reused, even after
/// deletion; creation order is preserved.
#[derive(Clone, Debug, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn next_id(&self) -> u64 {
        self.items
            .iter()
            .map(|item| item.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    pub fn add(&mut self, text: &str, now_rfc3339: String) -> TodoReply {
        let text = text.trim();
        if text.is_empty() {
            return TodoReply::unchanged("Usage: todo add <text>");
        }

        let id = self.next_id();
        self.items.push(TodoItem {
            id,
            text: text.to_string(),
            completed: false,
            created_at_rfc3339: now_rfc3339,
            completed_at_rfc3339: None,
        });
        TodoReply::changed(format!("Added #{id}: {text}"))
    }

    pub fn list(&self, filter: TodoFilter) -> String {
        let matching = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .collect::<Vec<_>>();

        if matching.is_empty() {
            return format!("No {}todos.", filter.label());
        }

        let mut out = String::new();
        for item in matching {
            let mark = if item.completed { "x" } else { " " };
            out.push_str(&format!("[{mark}] #{} {}\n", item.id, item.text));
        }
        out.push_str(&format!(
            "\n{} total. Use \"todo done <id>\" to complete.",
            self.items.len()
        ));
        out
    }

    pub fn complete(&mut self, id: u64, now_rfc3339: String) -> TodoReply {
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            return TodoReply::unchanged(format!("Todo #{id} not found."));
        };

        if item.completed {
            return TodoReply::unchanged(format!("Todo #{id} is already completed."));
        }

        item.completed = true;
        item.completed_at_rfc3339 = Some(now_rfc3339);
        TodoReply::changed(format!("Completed #{id}: {}", item.text))
    }

    pub fn remove(&mut self, id: u64) -> TodoReply {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return TodoReply::unchanged(format!("Todo #{id} not found."));
        }
        TodoReply::changed(format!("Removed #{id}."))
    }

    pub fn clear(&mut self, only_completed: bool) -> TodoReply {
        let before = self.items.len();
        if only_completed {
            self.items.retain(|item| !item.completed);
        } else {
            self.items.clear();
        }

        let removed = before - self.items.len();
        if removed == 0 {
            return TodoReply::unchanged("Nothing to clear.");
        }

        let what = if only_completed {
            "completed todo(s)"
        } else {
            "todo(s)"
        };
        TodoReply::changed(format!("Removed {removed} {what}."))
    }
}
