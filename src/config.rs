//! Run configuration.
//!
//! Every constant the traversal depends on lives here so a run can be tuned
//! from the CLI without touching the control flow. Defaults match the values
//! the registry has been scraped with in production.

use std::time::Duration;

/// Configuration for one scraping run
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// URL of the project list page
    pub list_url: String,

    /// Substring the post-load URL must contain for the site to count as loaded
    pub expected_url_fragment: String,

    /// Link text of the per-record detail control on the list page
    pub view_details_label: String,

    /// Cap on the number of records processed per run
    pub max_records: usize,

    /// Wait bound for the very first list-page load
    pub initial_load_timeout: Duration,

    /// Wait bound for list and detail renders during a record's traversal
    pub page_load_timeout: Duration,

    /// Wait bound for the promoter sub-tab render, which is the slowest view
    pub promoter_load_timeout: Duration,

    /// Wait bound for the list page's detail controls to appear
    pub element_timeout: Duration,

    /// Settle delay after a readiness signal, covering late dynamic content
    pub settle_delay: Duration,

    /// Extra settle after the detail controls appear on the list page
    pub list_settle_delay: Duration,

    /// Settle after scrolling an element into view
    pub scroll_settle_delay: Duration,

    /// Pause between records, trading throughput for not getting throttled
    pub inter_record_delay: Duration,

    /// Where to dump the page source when the list page yields no controls
    pub debug_dump_path: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            list_url: "https://rera.odisha.gov.in/projects/project-list".to_string(),
            expected_url_fragment: "rera".to_string(),
            view_details_label: "View Details".to_string(),
            max_records: 6,
            initial_load_timeout: Duration::from_secs(30),
            page_load_timeout: Duration::from_secs(20),
            promoter_load_timeout: Duration::from_secs(25),
            element_timeout: Duration::from_secs(20),
            settle_delay: Duration::from_secs(2),
            list_settle_delay: Duration::from_secs(3),
            scroll_settle_delay: Duration::from_secs(2),
            inter_record_delay: Duration::from_secs(5),
            debug_dump_path: "debug_page_source.html".to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the list page URL
    pub fn list_url(mut self, url: impl Into<String>) -> Self {
        self.list_url = url.into();
        self
    }

    /// Builder method: set the expected URL fragment
    pub fn expected_url_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.expected_url_fragment = fragment.into();
        self
    }

    /// Builder method: set the detail-control link text
    pub fn view_details_label(mut self, label: impl Into<String>) -> Self {
        self.view_details_label = label.into();
        self
    }

    /// Builder method: set the record cap
    pub fn max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Builder method: set the inter-record delay
    pub fn inter_record_delay(mut self, delay: Duration) -> Self {
        self.inter_record_delay = delay;
        self
    }

    /// Builder method: zero out every settle delay and shrink the wait bounds.
    /// Useful against fakes and local fixtures where nothing needs to settle.
    pub fn without_delays(mut self) -> Self {
        self.settle_delay = Duration::ZERO;
        self.list_settle_delay = Duration::ZERO;
        self.scroll_settle_delay = Duration::ZERO;
        self.inter_record_delay = Duration::ZERO;
        self.initial_load_timeout = Duration::from_millis(50);
        self.page_load_timeout = Duration::from_millis(50);
        self.promoter_load_timeout = Duration::from_millis(50);
        self.element_timeout = Duration::from_millis(50);
        self
    }
}
