//! Rendering-session abstraction.
//!
//! The navigation core never touches the browser directly; it talks to a
//! [`PageRenderer`], so the whole control flow can be exercised against a
//! scripted fake with no live session. [`ChromeRenderer`] is the production
//! implementation over Chrome DevTools Protocol.

pub mod chrome;

pub use chrome::{ChromeRenderer, RendererOptions};

use crate::error::Result;
use std::time::Duration;

/// Tag kinds an element query can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// Anchor elements
    Link,
    /// Button elements
    Button,
    /// List items (tab bars are usually rendered as `li`)
    ListItem,
    /// Any element
    Any,
}

impl TagKind {
    fn xpath_name(&self) -> &'static str {
        match self {
            TagKind::Link => "a",
            TagKind::Button => "button",
            TagKind::ListItem => "li",
            TagKind::Any => "*",
        }
    }
}

/// One way of locating live elements in the rendered session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementQuery {
    /// Element whose text equals `text` exactly
    ExactText { tag: TagKind, text: String },
    /// Element whose text contains `text`, case-insensitively
    PartialText { tag: TagKind, text: String },
    /// Element carrying `role` whose text contains `text`, case-insensitively
    RoleText { role: String, text: String },
}

const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";

impl ElementQuery {
    pub fn exact(tag: TagKind, text: impl Into<String>) -> Self {
        Self::ExactText { tag, text: text.into() }
    }

    pub fn partial(tag: TagKind, text: impl Into<String>) -> Self {
        Self::PartialText { tag, text: text.into() }
    }

    pub fn role(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self::RoleText { role: role.into(), text: text.into() }
    }

    /// The text this query matches against, for logging
    pub fn text(&self) -> &str {
        match self {
            Self::ExactText { text, .. }
            | Self::PartialText { text, .. }
            | Self::RoleText { text, .. } => text,
        }
    }

    /// XPath equivalent of this query. Query text must not contain single
    /// quotes; the label vocabulary this crate queries for never does.
    pub fn to_xpath(&self) -> String {
        match self {
            Self::ExactText { tag, text } => {
                format!("//{}[text()='{}']", tag.xpath_name(), text)
            }
            Self::PartialText { tag, text } => format!(
                "//{}[contains(translate(text(), '{UPPER}', '{LOWER}'), '{}')]",
                tag.xpath_name(),
                text.to_lowercase(),
            ),
            Self::RoleText { role, text } => format!(
                "//*[@role='{role}' and contains(translate(text(), '{UPPER}', '{LOWER}'), '{}')]",
                text.to_lowercase(),
            ),
        }
    }
}

/// Positional handle to one live element matched by a query.
///
/// Valid only until the next page load; renderers re-resolve the query at use
/// time, so a handle held across a reload must be re-enumerated by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementHandle {
    pub query: ElementQuery,
    pub position: usize,
}

impl ElementHandle {
    pub fn new(query: ElementQuery, position: usize) -> Self {
        Self { query, position }
    }
}

/// One interactive rendering session.
///
/// All operations are blocking; waits poll with bounded timeouts and report
/// expiry as `Ok(false)` rather than an error, so callers can proceed with
/// whatever the page currently shows.
pub trait PageRenderer {
    /// Navigate the session to a URL
    fn load(&mut self, url: &str) -> Result<()>;

    /// URL the session currently shows
    fn current_url(&mut self) -> Result<String>;

    /// Full serialized markup of the current render
    fn current_markup(&mut self) -> Result<String>;

    /// Evaluate JavaScript in the page, returning its JSON value
    fn run_script(&mut self, code: &str) -> Result<serde_json::Value>;

    /// Enumerate live elements matching a query, in page order. An empty
    /// result is not an error.
    fn find_all(&mut self, query: &ElementQuery) -> Result<Vec<ElementHandle>>;

    /// Scroll an element into the viewport
    fn scroll_into_view(&mut self, handle: &ElementHandle) -> Result<()>;

    /// Direct (trusted-input) activation of an element
    fn activate(&mut self, handle: &ElementHandle) -> Result<()>;

    /// Script-driven activation, used as the fallback when a direct click is
    /// blocked or intercepted
    fn activate_via_script(&mut self, handle: &ElementHandle) -> Result<()>;

    /// Block until the page reports itself ready or the timeout expires.
    /// Returns `Ok(false)` on timeout.
    fn wait_for_ready(&mut self, timeout: Duration) -> Result<bool>;

    /// Block until at least one element matches the query or the timeout
    /// expires. Returns `Ok(false)` on timeout.
    fn wait_for_element(&mut self, query: &ElementQuery, timeout: Duration) -> Result<bool>;

    /// Release the session's resources
    fn close(&mut self) -> Result<()>;
}
