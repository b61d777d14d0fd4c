//! Arrow-key recall backed by the session history
//!
//! The line editor searches the same entries the dispatch loop records, so
//! recall sees every submitted line: duplicates and blank lines included.
//! Lines from earlier sessions come first when persistence is enabled.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use reedline::{
    CommandLineSearch, History as EditorHistory, HistoryItem, HistoryItemId, HistorySessionId,
    ReedlineError, ReedlineErrorVariants, SearchDirection, SearchQuery,
};
use tracing::{debug, warn};

use super::history::History;

/// Display name used in reedline errors
const HISTORY_NAME: &str = "RecallHistory";

/// Marker replacing newlines inside one persisted entry
const NEWLINE_ESCAPE: &str = "<\\n>";

/// Read-only view of the session history for the line editor.
///
/// Saving through the editor is a no-op: the dispatch loop is the only
/// writer. Item ids index the earlier-session lines followed by the session
/// entries.
#[derive(Debug)]
pub struct RecallHistory {
    /// Lines loaded from the history file at startup
    previous: Vec<String>,

    /// Lines submitted in this session
    session: History,

    /// History file and the number of lines it keeps
    file: Option<(PathBuf, usize)>,

    /// Session entries already written to the file
    written: usize,
}

impl RecallHistory {
    /// Recall over the session only
    pub fn in_memory(session: History) -> Self {
        Self {
            previous: Vec::new(),
            session,
            file: None,
            written: 0,
        }
    }

    /// Recall that also offers the last `max_size` lines of `path`, and
    /// appends this session's lines to it on sync.
    ///
    /// A missing file starts empty; an unreadable one is logged and skipped.
    pub fn with_file(session: History, path: PathBuf, max_size: usize) -> Self {
        let previous = match read_entries(&path) {
            Ok(mut lines) => {
                let excess = lines.len().saturating_sub(max_size);
                lines.drain(..excess);
                debug!(path = %path.display(), entries = lines.len(), "history file loaded");
                lines
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "history file unavailable");
                Vec::new()
            }
        };

        Self {
            previous,
            session,
            written: 0,
            file: Some((path, max_size)),
        }
    }

    /// Every recallable line, oldest first
    fn snapshot(&self) -> Vec<String> {
        let mut lines = self.previous.clone();
        lines.extend(self.session.entries());
        lines
    }

    fn unsupported(feature: &'static str) -> ReedlineError {
        ReedlineError(ReedlineErrorVariants::HistoryFeatureUnsupported {
            history: HISTORY_NAME,
            feature,
        })
    }

    fn item(id: usize, line: String) -> HistoryItem {
        HistoryItem {
            id: Some(HistoryItemId::new(id as i64)),
            ..HistoryItem::from_command_line(line)
        }
    }
}

impl EditorHistory for RecallHistory {
    fn save(&mut self, h: HistoryItem) -> reedline::Result<HistoryItem> {
        Ok(h)
    }

    fn load(&self, id: HistoryItemId) -> reedline::Result<HistoryItem> {
        let missing =
            || ReedlineError(ReedlineErrorVariants::OtherHistoryError("Item does not exist"));
        let index = usize::try_from(id.0).map_err(|_| missing())?;
        let line = match index.checked_sub(self.previous.len()) {
            Some(i) => self.session.get(i),
            None => self.previous.get(index).cloned(),
        }
        .ok_or_else(missing)?;
        Ok(Self::item(index, line))
    }

    fn count(&self, query: SearchQuery) -> reedline::Result<i64> {
        Ok(self.search(query)?.len() as i64)
    }

    fn search(&self, query: SearchQuery) -> reedline::Result<Vec<HistoryItem>> {
        if query.start_time.is_some() || query.end_time.is_some() {
            return Err(Self::unsupported("filtering by time"));
        }
        if query.filter.hostname.is_some()
            || query.filter.cwd_exact.is_some()
            || query.filter.cwd_prefix.is_some()
            || query.filter.exit_successful.is_some()
        {
            return Err(Self::unsupported("filtering by extra info"));
        }

        let lines = self.snapshot();
        let last = lines.len() as i64 - 1;

        // Id bounds are exclusive and swap roles when searching backward
        let (lower, upper) = match query.direction {
            SearchDirection::Backward => (query.end_id, query.start_id),
            SearchDirection::Forward => (query.start_id, query.end_id),
        };
        let min = lower.map_or(0, |id| id.0 + 1).max(0);
        let max = upper.map_or(last, |id| id.0 - 1).min(last);
        if min > max {
            return Ok(Vec::new());
        }

        let is_match = |line: &String| match &query.filter.command_line {
            Some(CommandLineSearch::Prefix(p)) => line.starts_with(p.as_str()),
            Some(CommandLineSearch::Substring(p)) => line.contains(p.as_str()),
            Some(CommandLineSearch::Exact(p)) => line == p,
            None => true,
        };
        let limit = query.limit.map_or(usize::MAX, |n| n.max(0) as usize);

        let range = lines
            .into_iter()
            .enumerate()
            .skip(min as usize)
            .take((max - min + 1) as usize)
            .filter(|(_, line)| is_match(line));

        let items = match query.direction {
            SearchDirection::Backward => range
                .rev()
                .take(limit)
                .map(|(id, line)| Self::item(id, line))
                .collect(),
            SearchDirection::Forward => range
                .take(limit)
                .map(|(id, line)| Self::item(id, line))
                .collect(),
        };
        Ok(items)
    }

    fn update(
        &mut self,
        _id: HistoryItemId,
        _updater: &dyn Fn(HistoryItem) -> HistoryItem,
    ) -> reedline::Result<()> {
        Err(Self::unsupported("updating entries"))
    }

    fn clear(&mut self) -> reedline::Result<()> {
        Err(Self::unsupported("clearing entries"))
    }

    fn delete(&mut self, _h: HistoryItemId) -> reedline::Result<()> {
        Err(Self::unsupported("removing entries"))
    }

    /// Append unwritten session lines to the history file, keeping its
    /// newest `max_size` lines
    fn sync(&mut self) -> io::Result<()> {
        let Some((path, max_size)) = &self.file else {
            return Ok(());
        };

        let unwritten = self.session.entries_from(self.written);
        if unwritten.is_empty() {
            return Ok(());
        }

        let mut lines = match read_entries(path) {
            Ok(lines) => lines,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };
        lines.extend(unwritten.iter().cloned());
        let excess = lines.len().saturating_sub(*max_size);

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        for line in &lines[excess..] {
            writeln!(writer, "{}", line.replace('\n', NEWLINE_ESCAPE))?;
        }
        writer.flush()?;

        self.written += unwritten.len();
        debug!(path = %path.display(), appended = unwritten.len(), "history file synced");
        Ok(())
    }

    fn session(&self) -> Option<HistorySessionId> {
        None
    }
}

impl Drop for RecallHistory {
    fn drop(&mut self) {
        if let Err(e) = self.sync() {
            warn!(error = %e, "failed to write history file");
        }
    }
}

fn read_entries(path: &Path) -> io::Result<Vec<String>> {
    BufReader::new(File::open(path)?)
        .lines()
        .map(|line| line.map(|l| l.replace(NEWLINE_ESCAPE, "\n")))
        .collect()
}
