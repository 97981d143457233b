//! Bounded command history with an up/down browsing cursor

/// Submitted commands, most recent first
#[derive(Debug, Clone)]
pub struct CommandHistory {
    entries: Vec<String>,
    limit: usize,
    /// Index into `entries` while browsing; `None` when not browsing
    cursor: Option<usize>,
}

impl CommandHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
            cursor: None,
        }
    }

    /// Record a command at the front and stop browsing
    pub fn push(&mut self, command: impl Into<String>) {
        self.entries.insert(0, command.into());
        if self.entries.len() > self.limit {
            self.entries.truncate(self.limit);
            tracing::debug!("Trimmed command history to {} entries", self.limit);
        }
        self.cursor = None;
    }

    /// Step toward older entries. Returns the entry to show, or `None` at the oldest.
    pub fn older(&mut self) -> Option<&str> {
        let next = self.cursor.map_or(0, |i| i + 1);
        if next < self.entries.len() {
            self.cursor = Some(next);
            Some(&self.entries[next])
        } else {
            None
        }
    }

    /// Step toward newer entries
    ///
    /// Leaving the newest entry stops browsing and yields an empty line.
    /// Returns `None` when not browsing.
    pub fn newer(&mut self) -> Option<&str> {
        match self.cursor? {
            0 => {
                self.cursor = None;
                Some("")
            }
            i => {
                self.cursor = Some(i - 1);
                Some(&self.entries[i - 1])
            }
        }
    }

    /// Stop browsing without changing the entries
    pub fn reset_cursor(&mut self) {
        self.cursor = None;
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
