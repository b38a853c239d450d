//! Page locators
//!
//! A [`Locator`] is an opaque descriptor for finding elements on a rendered
//! page. [`ProductLocators`] bundles the named locators a product page
//! extraction needs, with defaults matching Flipkart's current markup. The
//! feature-table locator is deep and position-dependent, so it is a plain
//! swappable field: supply an alternate via [`ProductLocators::with_feature_table`]
//! when the page layout changes instead of touching the pipeline.

use std::fmt;

/// Descriptor for locating elements on a rendered page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
}

impl Locator {
    /// CSS selector locator
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    /// XPath locator
    pub fn xpath(expression: impl Into<String>) -> Self {
        Locator::XPath(expression.into())
    }

    /// Locator for an element id (`#id`)
    pub fn id(id: &str) -> Self {
        Locator::Css(format!("#{}", id))
    }

    /// Locator for a class name (`.class`)
    pub fn class(class: &str) -> Self {
        Locator::Css(format!(".{}", class))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => write!(f, "css:{}", selector),
            Locator::XPath(expression) => write!(f, "xpath:{}", expression),
        }
    }
}

/// Named set of locators for one product-page layout
#[derive(Debug, Clone)]
pub struct ProductLocators {
    /// Marker present only on the error interstitial page
    pub retry_marker: Locator,
    /// Product title element
    pub title: Locator,
    /// Combined "N Ratings & M Reviews" text element
    pub reviews_ratings: Locator,
    /// Highlight list entries
    pub highlights: Locator,
    /// Product description block
    pub description: Locator,
    /// "Read more" control expanding the description
    pub read_more: Locator,
    /// Entries of the "other features" row in the specification table.
    /// Position-dependent and expected to break across layout revisions.
    pub feature_table: Locator,
    /// Product image thumbnails
    pub images: Locator,
    /// Marker present only when the product is sold out
    pub sold_out: Locator,
}

impl ProductLocators {
    /// Replace the feature-table locator for an alternate page layout
    pub fn with_feature_table(mut self, locator: Locator) -> Self {
        self.feature_table = locator;
        self
    }
}

impl Default for ProductLocators {
    fn default() -> Self {
        Self {
            retry_marker: Locator::id("retry_btn"),
            title: Locator::xpath("//span[@class='B_NuCI']"),
            reviews_ratings: Locator::xpath("//span[@class='_2_R_DZ']"),
            highlights: Locator::class("_21Ahn-"),
            description: Locator::class("_1mXcCf"),
            read_more: Locator::class("_1FH0tX"),
            feature_table: Locator::xpath(
                "//*[@id=\"container\"]/div/div[3]/div[1]/div[2]/div[9]/div[5]\
                 /div/div[2]/div[1]/div[8]/table/tbody/tr[7]/td[2]/ul/li",
            ),
            images: Locator::class("q6DClP"),
            sold_out: Locator::class("_16FRp0"),
        }
    }
}
