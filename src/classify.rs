//! Page-state classification
//!
//! Flipkart sometimes serves an error interstitial ("something went wrong,
//! retry") instead of the product page. Classification runs exactly once per
//! session, immediately after navigation and a short settle delay, before any
//! field extraction. Stock status is not part of this classification; it is
//! probed separately once the other fields are in.

use crate::driver::PageDriver;
use crate::locator::ProductLocators;
use std::time::Duration;

/// Classification of a freshly loaded page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// A normal product page; field extraction may proceed
    Normal,
    /// The error/retry interstitial; no product content is present
    ErrorInterstitial,
}

/// Classify the page currently loaded in `driver`
pub fn classify(
    driver: &dyn PageDriver,
    locators: &ProductLocators,
    settle: Duration,
) -> PageState {
    std::thread::sleep(settle);
    if driver.present_now(&locators.retry_marker) {
        PageState::ErrorInterstitial
    } else {
        PageState::Normal
    }
}
