use thiserror::Error;

/// Errors that can occur while driving the browser session or extracting data
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Browser could not be launched
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Navigation to a URL failed
    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    /// No element matched the given query
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    /// Clicking or scrolling an element failed
    #[error("Interaction failed: {0}")]
    InteractionFailed(String),

    /// JavaScript evaluation in the page failed
    #[error("Script evaluation failed: {0}")]
    EvaluationFailed(String),

    /// Rendered markup could not be read or parsed
    #[error("Failed to read page markup: {0}")]
    MarkupUnavailable(String),

    /// Tab-level operation (create, close, focus) failed
    #[error("Tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Results could not be written to disk
    #[error("Failed to persist results: {0}")]
    PersistFailed(String),
}

/// Result type alias for scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
