//! Grammar table for the CeresDB query language
//!
//! Maps each [`GrammarPosition`] to the ordered list of tokens that are valid
//! there. The table is built once and never mutated afterwards; the
//! completion engine only reads from it.
//!
//! # Examples
//!
//! ```
//! use ceresdb_cli::grammar::{GrammarPosition, GrammarTable};
//!
//! let table = GrammarTable::ceresdb();
//! let resources = table.lookup(&GrammarPosition::after_verb("patch"));
//! assert_eq!(resources.len(), 1);
//! assert_eq!(resources[0].token(), "record");
//! ```

use std::collections::HashMap;

/// Where in a command the cursor currently sits
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GrammarPosition {
    /// Before any verb, or right after a chain separator
    StartOfCommand,

    /// A verb has just been completed; resources for that verb follow
    AfterVerb(String),
}

impl GrammarPosition {
    /// Create an after-verb position
    pub fn after_verb(verb: impl Into<String>) -> Self {
        Self::AfterVerb(verb.into())
    }
}

/// A single completion candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    token: String,
    description: String,
}

impl Suggestion {
    /// Create a new suggestion
    pub fn new(token: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            description: description.into(),
        }
    }

    /// Text inserted when the suggestion is accepted
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Short human-readable description
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Immutable mapping from grammar position to valid tokens
#[derive(Debug, Clone, Default)]
pub struct GrammarTable {
    entries: HashMap<GrammarPosition, Vec<Suggestion>>,
}

impl GrammarTable {
    /// Start building a table
    pub fn builder() -> GrammarTableBuilder {
        GrammarTableBuilder::default()
    }

    /// The CeresDB grammar: verbs at the start of a command, and per-verb
    /// resource sets after the verb.
    pub fn ceresdb() -> Self {
        const COLLECTION: (&str, &str) = ("collection", "Collection resource");
        const DATABASE: (&str, &str) = ("database", "Database resource");
        const PERMIT: (&str, &str) = ("permit", "User permission resource");
        const RECORD: (&str, &str) = ("record", "Data record resource");
        const USER: (&str, &str) = ("user", "Instance-wide user resource");

        let all = [COLLECTION, DATABASE, PERMIT, RECORD, USER];

        Self::builder()
            .verb("delete", "Delete data", &all)
            .verb("get", "Get data", &all)
            .verb("patch", "Update part of data", &[RECORD])
            .verb("post", "Insert new data", &all)
            .verb("put", "Update existing data", &[COLLECTION, PERMIT, RECORD, USER])
            .verb("filter", "Filter the results of a GET query", &[])
            .verb(
                "orderasc",
                "Order results of a GET query in ascending order",
                &[],
            )
            .verb(
                "orderdsc",
                "Order results of a GET query in descending order",
                &[],
            )
            .verb("limit", "Limit the number of results of a GET query", &[])
            .verb("count", "Return the number of results of a GET query", &[])
            .verb("exit", "Quit the CeresDB client", &[])
            .build()
    }

    /// Candidates valid at `position`, in declaration order.
    ///
    /// Positions without an entry yield an empty slice.
    pub fn lookup(&self, position: &GrammarPosition) -> &[Suggestion] {
        self.entries
            .get(position)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check whether `token` is one of the verbs offered at the start of a command
    pub fn is_verb(&self, token: &str) -> bool {
        self.lookup(&GrammarPosition::StartOfCommand)
            .iter()
            .any(|s| s.token() == token)
    }
}

/// Builder for [`GrammarTable`]
#[derive(Debug, Default)]
pub struct GrammarTableBuilder {
    entries: HashMap<GrammarPosition, Vec<Suggestion>>,
}

impl GrammarTableBuilder {
    /// Declare a verb together with the resources it accepts.
    ///
    /// Each verb gets its own resource list; an empty list means free-form
    /// text follows the verb.
    pub fn verb(mut self, verb: &str, description: &str, resources: &[(&str, &str)]) -> Self {
        self.entries
            .entry(GrammarPosition::StartOfCommand)
            .or_default()
            .push(Suggestion::new(verb, description));

        if !resources.is_empty() {
            self.entries.insert(
                GrammarPosition::after_verb(verb),
                resources
                    .iter()
                    .map(|(token, desc)| Suggestion::new(*token, *desc))
                    .collect(),
            );
        }
        self
    }

    /// Add candidates for an arbitrary position
    pub fn position(mut self, position: GrammarPosition, suggestions: Vec<Suggestion>) -> Self {
        self.entries.entry(position).or_default().extend(suggestions);
        self
    }

    /// Finish the table
    pub fn build(self) -> GrammarTable {
        GrammarTable {
            entries: self.entries,
        }
    }
}
