//! Per-record navigation control flow.
//!
//! One [`NavigationController`] drives a single rendering session through the
//! list → detail → promoter-tab traversal for each record index. Every index
//! starts from a freshly reloaded list page so interaction failures and
//! client-side state never compound across records. Failures are isolated at
//! the record boundary: the batch loop never aborts because one record's
//! traversal blew up.

use crate::assemble::RecordAssembler;
use crate::config::ScrapeConfig;
use crate::error::{Result, ScrapeError};
use crate::markup::MarkupTree;
use crate::record::{FieldValue, Record};
use crate::render::{ElementHandle, ElementQuery, PageRenderer, TagKind};
use scraper::Selector;
use std::time::Duration;

/// Keywords scanned for in page-content diagnostics
const DIAGNOSTIC_KEYWORDS: &[&str] = &["rera", "project", "promoter", "gst", "address", "company"];

/// Drives one record's full traversal per call to [`process`](Self::process)
pub struct NavigationController<R: PageRenderer> {
    renderer: R,
    assembler: RecordAssembler,
    config: ScrapeConfig,
}

impl<R: PageRenderer> NavigationController<R> {
    pub fn new(renderer: R, config: ScrapeConfig) -> Self {
        Self { renderer, assembler: RecordAssembler::new(), config }
    }

    /// Controller with a custom assembler (e.g. a configured label table)
    pub fn with_assembler(renderer: R, assembler: RecordAssembler, config: ScrapeConfig) -> Self {
        Self { renderer, assembler, config }
    }

    /// Process the whole batch: load the list page once to size the run, then
    /// traverse `min(max_records, available)` indexes sequentially with the
    /// configured inter-record delay.
    ///
    /// Only run-level problems (list page unreachable, wrong site, nothing to
    /// click) are errors here; each record's own failure is contained in its
    /// returned [`Record`].
    pub fn run(&mut self) -> Result<Vec<Record>> {
        log::info!("Loading project list: {}", self.config.list_url);
        self.renderer.load(&self.config.list_url)?;
        self.wait_for_render(self.config.initial_load_timeout)?;

        let url = self.renderer.current_url()?;
        if !url.to_lowercase().contains(&self.config.expected_url_fragment) {
            return Err(ScrapeError::NavigationFailed(format!(
                "list page did not load, current URL is {}",
                url
            )));
        }

        let available = self.renderer.find_all(&self.view_details_query())?.len();
        log::info!("Found {} records available", available);

        if available == 0 {
            self.dump_page_source();
            return Err(ScrapeError::ElementNotFound(format!(
                "no '{}' controls on the list page",
                self.config.view_details_label
            )));
        }

        let count = available.min(self.config.max_records);
        let mut records = Vec::with_capacity(count);
        for index in 0..count {
            log::info!("--- Processing record {}/{} ---", index + 1, count);
            records.push(self.process(index));
            std::thread::sleep(self.config.inter_record_delay);
        }

        log::info!("Processed {} of {} records", records.len(), count);
        Ok(records)
    }

    /// Traverse one record. Never returns an error: a traversal failure is
    /// reported as a record whose every field carries the `Error` sentinel.
    pub fn process(&mut self, index: usize) -> Record {
        match self.traverse(index) {
            Ok(record) => record,
            Err(e) => {
                log::error!("Record {} failed: {}", index + 1, e);
                Record::failed(index + 1)
            }
        }
    }

    /// Release the rendering session
    pub fn shutdown(&mut self) -> Result<()> {
        self.renderer.close()
    }

    /// The underlying rendering session
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    fn traverse(&mut self, index: usize) -> Result<Record> {
        // Fresh list page every time; handles from earlier loads are invalid
        self.renderer.load(&self.config.list_url)?;
        self.wait_for_render(self.config.page_load_timeout)?;

        let query = self.view_details_query();
        if !self.renderer.wait_for_element(&query, self.config.element_timeout)? {
            log::warn!("Detail controls did not appear within the wait bound, continuing");
        }
        std::thread::sleep(self.config.list_settle_delay);

        let handles = self.renderer.find_all(&query)?;
        if index >= handles.len() {
            log::error!("Index {} out of range, only {} controls present", index, handles.len());
            return Ok(Record::unavailable(index + 1));
        }

        let handle = handles[index].clone();
        log::info!("Opening record {}", index + 1);
        self.renderer.scroll_into_view(&handle)?;
        std::thread::sleep(self.config.scroll_settle_delay);
        self.interact(&handle)?;
        self.wait_for_render(self.config.page_load_timeout)?;

        let tree = MarkupTree::parse(&self.renderer.current_markup()?);
        self.log_page_diagnostics(&tree, index + 1);

        let (registration_number, project_name) = self.assembler.assemble_base(&tree);
        log::info!("Found project: {} ({})", project_name, registration_number);

        // Promoter fields default to NotFound; a failure anywhere inside the
        // sub-tab traversal must not fail the whole record
        let (promoter_name, promoter_address, gst_number) = match self.open_promoter_tab() {
            Ok(Some(promoter_tree)) => self.assembler.assemble_promoter(&promoter_tree),
            Ok(None) => {
                log::warn!("No promoter details tab found with any selector");
                (FieldValue::NotFound, FieldValue::NotFound, FieldValue::NotFound)
            }
            Err(e) => {
                log::error!("Error accessing promoter details: {}", e);
                (FieldValue::NotFound, FieldValue::NotFound, FieldValue::NotFound)
            }
        };

        Ok(Record {
            project_no: index + 1,
            registration_number,
            project_name,
            promoter_name,
            promoter_address,
            gst_number,
        })
    }

    /// Locate and open the promoter sub-tab, returning its rendered tree, or
    /// `None` when no selector strategy finds the tab
    fn open_promoter_tab(&mut self) -> Result<Option<MarkupTree>> {
        let Some(handle) = self.find_promoter_tab()? else {
            return Ok(None);
        };

        log::info!("Opening promoter details tab");
        self.renderer.scroll_into_view(&handle)?;
        std::thread::sleep(self.config.scroll_settle_delay);
        self.interact(&handle)?;
        self.wait_for_render(self.config.promoter_load_timeout)?;

        let tree = MarkupTree::parse(&self.renderer.current_markup()?);
        Ok(Some(tree))
    }

    /// First match across the ordered promoter selector strategies
    fn find_promoter_tab(&mut self) -> Result<Option<ElementHandle>> {
        for query in promoter_tab_queries() {
            let mut handles = self.renderer.find_all(&query)?;
            if !handles.is_empty() {
                log::info!("Found promoter tab via {:?}", query);
                return Ok(Some(handles.remove(0)));
            }
        }
        Ok(None)
    }

    /// Direct activation with exactly one script-driven fallback attempt
    fn interact(&mut self, handle: &ElementHandle) -> Result<()> {
        if let Err(e) = self.renderer.activate(handle) {
            log::info!("Direct activation failed ({}), trying script click", e);
            self.renderer.activate_via_script(handle)?;
        }
        Ok(())
    }

    /// Poll the readiness signal, then apply the fixed settle delay. A timeout
    /// is logged and tolerated; callers read whatever markup is present.
    fn wait_for_render(&mut self, timeout: Duration) -> Result<()> {
        if !self.renderer.wait_for_ready(timeout)? {
            log::warn!("Render wait timed out after {:?}, continuing with current markup", timeout);
        }
        std::thread::sleep(self.config.settle_delay);
        Ok(())
    }

    fn view_details_query(&self) -> ElementQuery {
        ElementQuery::exact(TagKind::Link, self.config.view_details_label.clone())
    }

    fn dump_page_source(&mut self) {
        match self.renderer.current_markup() {
            Ok(markup) => {
                if let Err(e) = std::fs::write(&self.config.debug_dump_path, markup) {
                    log::error!("Could not write page source dump: {}", e);
                } else {
                    log::info!("Page source saved to {} for analysis", self.config.debug_dump_path);
                }
            }
            Err(e) => log::error!("Could not read page source for dump: {}", e),
        }
    }

    /// Log a structural preview of the detail page to help diagnose why a
    /// field did or did not resolve
    fn log_page_diagnostics(&self, tree: &MarkupTree, project_no: usize) {
        if !log::log_enabled!(log::Level::Debug) {
            return;
        }

        let tables = Selector::parse("table").expect("table selector is valid");
        let rows = Selector::parse("tr").expect("row selector is valid");
        let cells = Selector::parse("th, td").expect("cell selector is valid");

        let table_count = tree.select(&tables).count();
        log::debug!("Record {}: page has {} tables", project_no, table_count);

        for (t, table) in tree.select(&tables).enumerate() {
            for (r, row) in table.select(&rows).take(3).enumerate() {
                let preview: Vec<String> = row
                    .select(&cells)
                    .map(|cell| crate::markup::element_text(&cell).chars().take(50).collect())
                    .collect();
                log::debug!("  table {} row {}: {:?}", t + 1, r + 1, preview);
            }
        }

        let page_text = tree.full_text().to_lowercase();
        for keyword in DIAGNOSTIC_KEYWORDS {
            if let Some(pos) = page_text.find(keyword) {
                let context: String = page_text[pos..].chars().take(100).collect();
                log::debug!("  keyword '{}' context: {}", keyword, context);
            }
        }
    }
}

/// Ordered selector strategies for locating the promoter sub-tab: exact link
/// text first, then case-insensitive partial text across tag kinds, then a
/// role-qualified match. The first query with any match wins.
fn promoter_tab_queries() -> Vec<ElementQuery> {
    vec![
        ElementQuery::exact(TagKind::Link, "Promoter Details"),
        ElementQuery::partial(TagKind::Link, "Promoter"),
        ElementQuery::partial(TagKind::Any, "Promoter Details"),
        ElementQuery::partial(TagKind::Button, "Promoter"),
        ElementQuery::role("tab", "Promoter"),
        ElementQuery::partial(TagKind::ListItem, "Promoter"),
    ]
}
