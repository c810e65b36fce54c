//! # rera-scrape
//!
//! Adaptive scraper for the Odisha RERA project registry. The registry
//! renders its pages dynamically and its markup schema is undocumented and
//! inconsistent from record to record, so extraction is built around two
//! ideas:
//!
//! - **Layered field extraction**: labeled values are located by a
//!   fixed-priority list of independent structural heuristics (table rows,
//!   block/sibling pairs, inline label/value spans), the first hit winning.
//!   Absent data is a `NotFound` sentinel, never a failure.
//! - **Isolated per-record navigation**: each record is traversed
//!   list → detail → promoter tab from a freshly reloaded list page, with a
//!   script-click fallback for blocked interactions and bounded render waits
//!   that degrade to "use what rendered" instead of aborting. A record whose
//!   traversal fails is reported with `Error` sentinels; the batch continues.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rera_scrape::{ChromeRenderer, NavigationController, RendererOptions, ScrapeConfig};
//!
//! # fn main() -> rera_scrape::Result<()> {
//! let renderer = ChromeRenderer::launch(RendererOptions::new().headless(true))?;
//! let mut controller = NavigationController::new(renderer, ScrapeConfig::new().max_records(6));
//!
//! let records = controller.run()?;
//! controller.shutdown()?;
//!
//! for record in &records {
//!     println!("{}: {}", record.project_no, record.project_name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`markup`]: immutable parsed snapshot of one rendered page
//! - [`extract`]: the extraction-strategy engine
//! - [`assemble`]: canonical fields, label synonyms, record assembly
//! - [`render`]: the `PageRenderer` seam and its Chrome implementation
//! - [`navigate`]: per-record traversal control flow
//! - [`collect`]: record aggregation, JSON output, console report
//! - [`config`]: externalized run constants
//! - [`error`]: error types and result alias

pub mod assemble;
pub mod collect;
pub mod config;
pub mod error;
pub mod extract;
pub mod markup;
pub mod navigate;
pub mod record;
pub mod render;

pub use assemble::{default_labels, FieldLabels, RecordAssembler};
pub use collect::ResultCollector;
pub use config::ScrapeConfig;
pub use error::{Result, ScrapeError};
pub use extract::{ExtractionStrategy, FieldExtractor};
pub use markup::MarkupTree;
pub use navigate::NavigationController;
pub use record::{Field, FieldValue, Record};
pub use render::{ChromeRenderer, ElementHandle, ElementQuery, PageRenderer, RendererOptions, TagKind};
