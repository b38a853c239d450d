//! End-to-end batch run against scripted page sessions: identifiers in,
//! classified and extracted records out, aggregated into one CSV export.

use fsn_scraper::{
    BatchOrchestrator, BatchStatus, ElementHandle, Locator, LookupError, PageDriver,
    ProductLocators, ProductRecord, Result, RetryPolicy, ScrapeConfig, ScrapeError,
    SessionFactory, export,
};
use std::cell::Cell;
use std::collections::HashMap;
use std::time::Duration;

/// One scripted product page
#[derive(Clone, Default)]
struct Page {
    interstitial: bool,
    fails_to_open: bool,
    elements: HashMap<Locator, Vec<ElementHandle>>,
}

impl Page {
    fn with(mut self, locator: Locator, handles: Vec<ElementHandle>) -> Self {
        self.elements.insert(locator, handles);
        self
    }
}

struct FakeSession {
    page: Page,
}

impl PageDriver for FakeSession {
    fn navigate(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn reload(&self) -> Result<()> {
        Ok(())
    }

    fn wait_for(
        &self,
        locator: &Locator,
        timeout: Duration,
    ) -> std::result::Result<ElementHandle, LookupError> {
        self.wait_for_all(locator, timeout)
            .map(|handles| handles.into_iter().next().expect("non-empty"))
    }

    fn wait_for_all(
        &self,
        locator: &Locator,
        _timeout: Duration,
    ) -> std::result::Result<Vec<ElementHandle>, LookupError> {
        match self.page.elements.get(locator) {
            Some(handles) if !handles.is_empty() => Ok(handles.clone()),
            _ => Err(LookupError::Timeout),
        }
    }

    fn find_all_now(&self, locator: &Locator) -> Vec<ElementHandle> {
        if self.page.interstitial && *locator == ProductLocators::default().retry_marker {
            return vec![ElementHandle::text("Retry")];
        }
        self.page.elements.get(locator).cloned().unwrap_or_default()
    }

    fn click(&self, _locator: &Locator) -> Result<()> {
        Ok(())
    }
}

struct FakeFactory {
    pages: Vec<Page>,
    opened: Cell<usize>,
}

impl FakeFactory {
    fn new(pages: Vec<Page>) -> Self {
        Self { pages, opened: Cell::new(0) }
    }
}

impl SessionFactory for FakeFactory {
    type Session = FakeSession;

    fn open(&self) -> Result<FakeSession> {
        let page = self.pages[self.opened.get()].clone();
        self.opened.set(self.opened.get() + 1);
        if page.fails_to_open {
            return Err(ScrapeError::LaunchFailed("no chrome binary".to_string()));
        }
        Ok(FakeSession { page })
    }
}

fn fast_config() -> ScrapeConfig {
    ScrapeConfig {
        settle: Duration::ZERO,
        retry: RetryPolicy { max_attempts: 1, delay: Duration::ZERO, wait_timeout: Duration::ZERO },
        ..ScrapeConfig::default()
    }
}

fn full_page(title: &str, images: &[&str]) -> Page {
    let locators = ProductLocators::default();
    Page::default()
        .with(locators.title, vec![ElementHandle::text(title)])
        .with(
            locators.reviews_ratings,
            vec![ElementHandle::text("1,234 Ratings & 567 Reviews")],
        )
        .with(
            locators.highlights,
            vec![ElementHandle::text("A"), ElementHandle::text("B")],
        )
        .with(locators.description, vec![ElementHandle::text("Soft cotton.")])
        .with(locators.feature_table, vec![ElementHandle::text("Machine wash")])
        .with(
            locators.images,
            images.iter().map(|url| ElementHandle::image(*url)).collect(),
        )
}

fn identifiers(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_batch_to_csv_export() {
    let pages = vec![
        full_page("Cotton Undershirt", &["u1", "u2"]),
        Page { interstitial: true, ..Page::default() },
        full_page("Steel Bottle", &[]),
    ];
    let orchestrator = BatchOrchestrator::new(FakeFactory::new(pages), fast_config());

    let result = orchestrator.run(&identifiers(&["P1", "P2", "P3"]));
    assert_eq!(result.status, BatchStatus::Completed);
    assert_eq!(result.records.len(), 3);

    let mut buffer = Vec::new();
    export::write_records(&result.records, &mut buffer).expect("export failed");
    let csv = String::from_utf8(buffer).expect("utf8");
    let lines: Vec<&str> = csv.lines().collect();

    // Union header: full-shape columns first (P1 was seen first), then the
    // issue column contributed by P2
    let header = lines[0];
    assert!(header.starts_with("fsn,Product Title,"));
    assert!(header.contains("issue"));
    assert!(header.contains("image_1") && header.contains("image_2"));

    assert!(lines[1].starts_with("P1,Cotton Undershirt,567,1234,"));
    assert!(lines[1].contains("u1") && lines[1].contains("u2"));
    assert!(lines[2].starts_with("P2,"));
    assert!(lines[2].contains("Unknown issue occurred on flipkart"));
    assert!(lines[3].starts_with("P3,Steel Bottle,"));
}

#[test]
fn test_mid_batch_failure_truncates_records() {
    let pages = vec![
        full_page("Cotton Undershirt", &[]),
        Page { fails_to_open: true, ..Page::default() },
        full_page("Steel Bottle", &[]),
    ];
    let factory = FakeFactory::new(pages);
    let orchestrator = BatchOrchestrator::new(factory, fast_config());

    let result = orchestrator.run(&identifiers(&["P1", "P2", "P3"]));

    assert_eq!(result.records.len(), 1);
    assert_eq!(result.records[0].identifier(), "P1");
    match result.status {
        BatchStatus::Aborted { identifier, .. } => assert_eq!(identifier, "P2"),
        BatchStatus::Completed => panic!("expected abort"),
    }
}

#[test]
fn test_sparse_page_degrades_to_sentinels() {
    let pages = vec![Page::default()];
    let orchestrator = BatchOrchestrator::new(FakeFactory::new(pages), fast_config());

    let result = orchestrator.run(&identifiers(&["P1"]));

    match &result.records[0] {
        ProductRecord::Product {
            title,
            reviews,
            ratings,
            highlights,
            description,
            other_features,
            images,
            sold_out,
            ..
        } => {
            assert_eq!(title, "");
            assert_eq!((*reviews, *ratings), (0, 0));
            assert_eq!(highlights, "No highlights found");
            assert_eq!(description, "No descriptions found");
            assert_eq!(other_features, "No other Features");
            assert!(images.is_empty());
            assert!(!sold_out);
        }
        ProductRecord::Issue { .. } => panic!("expected full shape"),
    }
}
