//! Field extraction pipeline
//!
//! Runs only on a page classified as normal. The steps are ordered and
//! independent; every one tolerates a missing element by substituting its
//! sentinel value instead of failing the record. The pipeline itself is
//! infallible: whatever the page withholds degrades to defaults.
//!
//! The sold-out marker is probed twice, once before image collection and once
//! after; only the second probe is recorded. The "read more" click is a
//! best-effort side effect whose outcome no later step depends on.

use crate::driver::PageDriver;
use crate::locator::ProductLocators;
use crate::progress::ProgressSink;
use crate::retry::{RetryPolicy, RetryableLookup};

/// Sentinel when no highlight entries are found
pub const NO_HIGHLIGHTS: &str = "No highlights found";
/// Sentinel when no description block is found
pub const NO_DESCRIPTIONS: &str = "No descriptions found";
/// Sentinel when the feature-table row is missing
pub const NO_OTHER_FEATURES: &str = "No other Features";

/// Extracted fields of one product page, sentinels included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub title: String,
    pub reviews: u64,
    pub ratings: u64,
    pub highlights: String,
    pub description: String,
    pub other_features: String,
    pub image_urls: Vec<String>,
    pub sold_out: bool,
}

/// The ordered extraction steps over one live page
pub struct FieldPipeline<'a> {
    locators: &'a ProductLocators,
    policy: RetryPolicy,
    sink: &'a dyn ProgressSink,
}

impl<'a> FieldPipeline<'a> {
    pub fn new(locators: &'a ProductLocators, policy: RetryPolicy, sink: &'a dyn ProgressSink) -> Self {
        Self { locators, policy, sink }
    }

    /// Run all extraction steps against `driver`
    pub fn run(&self, driver: &dyn PageDriver) -> ProductFields {
        let lookup = RetryableLookup::new(self.policy, self.sink);

        // 1. Title
        let title = lookup
            .lookup_one(driver, &self.locators.title)
            .map(|handle| handle.text)
            .unwrap_or_default();
        self.sink.field_extracted("1. Product Title", &title);

        // 2. Reviews & ratings, combined in one text element
        let (ratings, reviews) = lookup
            .lookup_all(driver, &self.locators.reviews_ratings)
            .and_then(|handles| handles.into_iter().next())
            .map(|handle| parse_rating_counts(&handle.text))
            .unwrap_or((0, 0));
        self.sink.field_extracted("2. Reviews", &reviews.to_string());
        self.sink.field_extracted("3. Ratings", &ratings.to_string());

        // 3. Highlights
        let highlights = lookup
            .lookup_all(driver, &self.locators.highlights)
            .map(|handles| join_texts(&handles))
            .unwrap_or_else(|| NO_HIGHLIGHTS.to_string());
        self.sink.field_extracted("4. Highlights", &highlights);

        // 4. Description
        let description = lookup
            .lookup_one(driver, &self.locators.description)
            .map(|handle| handle.text)
            .unwrap_or_else(|| NO_DESCRIPTIONS.to_string());
        self.sink.field_extracted("5. Descriptions", &description);

        // 5. Expand the description when a "read more" control exists.
        // The click is not verified; nothing downstream needs it.
        if lookup.lookup_one(driver, &self.locators.read_more).is_some() {
            self.sink.field_extracted("6. Readmore found", "");
            let _ = driver.click(&self.locators.read_more);
        }

        // 6. Other features from the specification table
        let other_features = lookup
            .lookup_all(driver, &self.locators.feature_table)
            .map(|handles| join_texts(&handles))
            .unwrap_or_else(|| NO_OTHER_FEATURES.to_string());
        self.sink.field_extracted("7. Other Features", &other_features);

        // Provisional stock probe; superseded by the final probe below
        let _provisional_sold_out = driver.present_now(&self.locators.sold_out);

        // 7. Images: immediate lookup, variable count, order preserved
        let image_urls: Vec<String> = driver
            .find_all_now(&self.locators.images)
            .into_iter()
            .map(|handle| handle.source.unwrap_or_default())
            .collect();
        for (i, url) in image_urls.iter().enumerate() {
            self.sink
                .field_extracted(&format!("8. Image {} URL", i + 1), url);
        }

        // 8. Authoritative stock probe, recorded last
        let sold_out = driver.present_now(&self.locators.sold_out);
        if sold_out {
            self.sink.field_extracted("9. Sold Out", "true");
        }

        ProductFields {
            title,
            reviews,
            ratings,
            highlights,
            description,
            other_features,
            image_urls,
            sold_out,
        }
    }
}

/// Parse `"<ratings> Ratings & <reviews> Reviews"` into `(ratings, reviews)`.
///
/// The leading numeric token of each half counts, with thousands separators
/// stripped. Missing separator or unparsable halves degrade to `(0, 0)`.
pub fn parse_rating_counts(text: &str) -> (u64, u64) {
    let Some((ratings_half, reviews_half)) = text.split_once(" & ") else {
        return (0, 0);
    };
    match (leading_count(ratings_half), leading_count(reviews_half)) {
        (Some(ratings), Some(reviews)) => (ratings, reviews),
        _ => (0, 0),
    }
}

fn leading_count(half: &str) -> Option<u64> {
    half.split_whitespace()
        .next()
        .and_then(|token| token.replace(',', "").parse().ok())
}

fn join_texts(handles: &[crate::driver::ElementHandle]) -> String {
    handles
        .iter()
        .map(|handle| handle.text.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{ElementHandle, LookupError};
    use crate::error::Result;
    use crate::locator::Locator;
    use crate::progress::NoopSink;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Driver serving a fixed page: locator -> handles. Sold-out presence is
    /// scripted per probe so the double evaluation is observable.
    struct PageFake {
        elements: HashMap<Locator, Vec<ElementHandle>>,
        sold_out_probes: RefCell<Vec<bool>>,
        clicks: RefCell<Vec<Locator>>,
    }

    impl PageFake {
        fn new() -> Self {
            Self {
                elements: HashMap::new(),
                sold_out_probes: RefCell::new(vec![false, false]),
                clicks: RefCell::new(Vec::new()),
            }
        }

        fn with(mut self, locator: Locator, handles: Vec<ElementHandle>) -> Self {
            self.elements.insert(locator, handles);
            self
        }

        fn sold_out_probes(self, probes: Vec<bool>) -> Self {
            *self.sold_out_probes.borrow_mut() = probes;
            self
        }
    }

    impl PageDriver for PageFake {
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
            match self.elements.get(locator) {
                Some(handles) if !handles.is_empty() => Ok(handles.clone()),
                _ => Err(LookupError::Timeout),
            }
        }

        fn find_all_now(&self, locator: &Locator) -> Vec<ElementHandle> {
            self.elements.get(locator).cloned().unwrap_or_default()
        }

        fn present_now(&self, locator: &Locator) -> bool {
            if *locator == ProductLocators::default().sold_out {
                let mut probes = self.sold_out_probes.borrow_mut();
                if probes.is_empty() { false } else { probes.remove(0) }
            } else {
                !self.find_all_now(locator).is_empty()
            }
        }

        fn click(&self, locator: &Locator) -> Result<()> {
            self.clicks.borrow_mut().push(locator.clone());
            Ok(())
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy { max_attempts: 1, delay: Duration::ZERO, wait_timeout: Duration::ZERO }
    }

    fn run_pipeline(page: &PageFake) -> ProductFields {
        let locators = ProductLocators::default();
        let sink = NoopSink;
        FieldPipeline::new(&locators, fast_policy(), &sink).run(page)
    }

    #[test]
    fn test_parse_rating_counts() {
        assert_eq!(parse_rating_counts("1,234 Ratings & 567 Reviews"), (1234, 567));
        assert_eq!(parse_rating_counts("38,006 Ratings & 3,124 Reviews"), (38006, 3124));
        assert_eq!(parse_rating_counts("12 Ratings & 3 Reviews"), (12, 3));
    }

    #[test]
    fn test_parse_rating_counts_without_separator() {
        // Non-empty text without " & " still degrades to zero
        assert_eq!(parse_rating_counts("1,234 Ratings"), (0, 0));
        assert_eq!(parse_rating_counts(""), (0, 0));
    }

    #[test]
    fn test_parse_rating_counts_unparsable() {
        assert_eq!(parse_rating_counts("many Ratings & few Reviews"), (0, 0));
        assert_eq!(parse_rating_counts(" & "), (0, 0));
    }

    #[test]
    fn test_empty_page_yields_sentinels() {
        let page = PageFake::new();
        let fields = run_pipeline(&page);

        assert_eq!(fields.title, "");
        assert_eq!(fields.reviews, 0);
        assert_eq!(fields.ratings, 0);
        assert_eq!(fields.highlights, NO_HIGHLIGHTS);
        assert_eq!(fields.description, NO_DESCRIPTIONS);
        assert_eq!(fields.other_features, NO_OTHER_FEATURES);
        assert!(fields.image_urls.is_empty());
        assert!(!fields.sold_out);
    }

    #[test]
    fn test_full_page_extraction() {
        let locators = ProductLocators::default();
        let page = PageFake::new()
            .with(locators.title.clone(), vec![ElementHandle::text("Cotton Undershirt")])
            .with(
                locators.reviews_ratings.clone(),
                vec![ElementHandle::text("1,234 Ratings & 567 Reviews")],
            )
            .with(
                locators.highlights.clone(),
                vec![ElementHandle::text("A"), ElementHandle::text("B")],
            )
            .with(locators.description.clone(), vec![ElementHandle::text("Soft cotton.")])
            .with(
                locators.feature_table.clone(),
                vec![ElementHandle::text("Machine wash")],
            )
            .with(
                locators.images.clone(),
                vec![
                    ElementHandle::image("u1"),
                    ElementHandle::image("u2"),
                    ElementHandle::image("u3"),
                ],
            );

        let fields = run_pipeline(&page);

        assert_eq!(fields.title, "Cotton Undershirt");
        assert_eq!(fields.ratings, 1234);
        assert_eq!(fields.reviews, 567);
        assert_eq!(fields.highlights, "A, B");
        assert_eq!(fields.description, "Soft cotton.");
        assert_eq!(fields.other_features, "Machine wash");
        assert_eq!(fields.image_urls, vec!["u1", "u2", "u3"]);
    }

    #[test]
    fn test_read_more_clicked_when_present() {
        let locators = ProductLocators::default();
        let page =
            PageFake::new().with(locators.read_more.clone(), vec![ElementHandle::text("Read More")]);

        let _ = run_pipeline(&page);

        assert_eq!(*page.clicks.borrow(), vec![locators.read_more.clone()]);
    }

    #[test]
    fn test_read_more_absence_is_not_an_error() {
        let page = PageFake::new();
        let _ = run_pipeline(&page);
        assert!(page.clicks.borrow().is_empty());
    }

    #[test]
    fn test_final_sold_out_probe_is_authoritative() {
        // Provisional probe says in stock, final says sold out
        let page = PageFake::new().sold_out_probes(vec![false, true]);
        let fields = run_pipeline(&page);
        assert!(fields.sold_out);

        // Provisional probe says sold out, final says in stock
        let page = PageFake::new().sold_out_probes(vec![true, false]);
        let fields = run_pipeline(&page);
        assert!(!fields.sold_out);
    }

    #[test]
    fn test_sold_out_probed_exactly_twice() {
        let page = PageFake::new().sold_out_probes(vec![false, true]);
        let _ = run_pipeline(&page);
        assert!(page.sold_out_probes.borrow().is_empty());
    }

    #[test]
    fn test_image_without_src_keeps_position() {
        let locators = ProductLocators::default();
        let page = PageFake::new().with(
            locators.images.clone(),
            vec![
                ElementHandle::image("u1"),
                ElementHandle::text("broken"),
                ElementHandle::image("u3"),
            ],
        );

        let fields = run_pipeline(&page);

        assert_eq!(fields.image_urls, vec!["u1", "", "u3"]);
    }
}
