//! The fixed request-path stages shown in the flow diagram.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One stage of the conceptual request path.
///
/// Declaration order is traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Frontend,
    ApiRequest,
    Backend,
    Db,
    Response,
    TableUpdate,
}

impl Step {
    /// All steps in traversal order
    pub const ALL: [Step; 6] = [
        Step::Frontend,
        Step::ApiRequest,
        Step::Backend,
        Step::Db,
        Step::Response,
        Step::TableUpdate,
    ];

    /// Position of this step in the traversal
    pub fn index(self) -> usize {
        self as usize
    }

    /// Steps from the first one up to and including `self`
    pub fn through(self) -> &'static [Step] {
        &Self::ALL[..=self.index()]
    }

    /// Steps strictly after `self`
    pub fn after(self) -> &'static [Step] {
        &Self::ALL[self.index() + 1..]
    }

    /// Snake-case key, as used in config and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Step::Frontend => "frontend",
            Step::ApiRequest => "api_request",
            Step::Backend => "backend",
            Step::Db => "db",
            Step::Response => "response",
            Step::TableUpdate => "table_update",
        }
    }

    /// Node label in the diagram
    pub fn label(self) -> &'static str {
        match self {
            Step::Frontend => "Frontend",
            Step::ApiRequest => "API Request",
            Step::Backend => "Backend",
            Step::Db => "Database",
            Step::Response => "Response",
            Step::TableUpdate => "Table Update",
        }
    }

    /// Glyph drawn inside the diagram node
    pub fn glyph(self) -> &'static str {
        match self {
            Step::Frontend => "▣",
            Step::ApiRequest => "→",
            Step::Backend => "⚙",
            Step::Db => "◫",
            Step::Response => "←",
            Step::TableUpdate => "▤",
        }
    }

    /// Status text recorded when a run enters this step
    pub fn description(self) -> &'static str {
        match self {
            Step::Frontend => "User action triggered",
            Step::ApiRequest => "Sending request to API",
            Step::Backend => "Backend processing request",
            Step::Db => "Querying/updating database",
            Step::Response => "Sending response to frontend",
            Step::TableUpdate => "Updating table in UI",
        }
    }

    /// Placeholder shown before any run has visited this step
    pub fn idle_status(self) -> &'static str {
        match self {
            Step::Frontend => "Waiting for user action",
            Step::ApiRequest => "No request sent",
            Step::Backend | Step::Db => "Idle",
            Step::Response => "No response",
            Step::TableUpdate => "No update",
        }
    }

    /// Whether entering this step publishes the pending call label
    pub fn is_request(self) -> bool {
        self == Step::ApiRequest
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::ALL
            .iter()
            .copied()
            .find(|step| step.key() == s)
            .ok_or_else(|| format!("unknown step '{}'", s))
    }
}
