//! The scoring rule engine.
//!
//! These rules collectively define how many points a receipt is worth:
//!
//! - one point for every alphanumeric character in the retailer name;
//! - 50 points if the total is a round dollar amount with no cents;
//! - 25 points if the total is a multiple of 0.25;
//! - 5 points for every two items on the receipt;
//! - if the trimmed length of an item description is a multiple of 3,
//!   one fifth of that item's price, rounded up;
//! - 6 points if the day in the purchase date is odd;
//! - 10 points if the purchase time is after 2:00pm and before 4:00pm;
//! - with [`ScoringConfig::large_total_bonus`] enabled, 5 points if the
//!   total is greater than 10.00.
//!
//! Every function here is pure and synchronous: same receipt in, same
//! points out, across invocations, threads, and process restarts. The rule
//! groups are public so their contributions can be asserted independently;
//! [`calculate_points`] is nothing more than their sum.

use crate::models::{Receipt, ScoringConfig};
use rust_decimal::Decimal;
use time::{Time, macros::time};
use tracing::{Level, event};

// Exclusive at both ends: a receipt stamped exactly 14:00 or 16:00 does
// not qualify.
const WINDOW_OPEN: Time = time!(14:00);
const WINDOW_CLOSE: Time = time!(16:00);

/// Compute the total points awarded to a receipt.
///
/// The receipt is assumed valid per the data-model invariants; this
/// function has no failure mode and no side effects beyond DEBUG-level
/// logging of each rule group's contribution.
pub fn calculate_points(receipt: &Receipt, config: &ScoringConfig) -> u64 {
    retailer_points(receipt)
        + total_points(receipt, config)
        + item_points(receipt)
        + date_time_points(receipt)
}

/// One point per alphanumeric character of the retailer name.
///
/// Counting is Unicode-aware: `Café 7` earns 5. Whitespace and
/// punctuation earn nothing.
pub fn retailer_points(receipt: &Receipt) -> u64 {
    let points = receipt
        .retailer
        .chars()
        .filter(|c| c.is_alphanumeric())
        .count() as u64;
    event!(Level::DEBUG, points, "retailer name rule");
    points
}

/// Points from the receipt total: 50 for whole dollars, 25 for a multiple
/// of 0.25, and the configurable 5-point bonus above 10.00.
///
/// The first two are independent, so a whole-dollar total always earns 75
/// from this group.
pub fn total_points(receipt: &Receipt, config: &ScoringConfig) -> u64 {
    let mut points = 0;
    if receipt.total.is_whole_dollars() {
        points += 50;
    }
    if receipt.total.is_quarter_multiple() {
        points += 25;
    }
    if config.large_total_bonus && receipt.total.amount() > Decimal::TEN {
        points += 5;
    }
    event!(Level::DEBUG, points, "receipt total rule");
    points
}

/// Points from the item list: 5 per pair of items, plus the
/// description-length contribution of each item.
///
/// An item qualifies when its trimmed description length is divisible by
/// 3, including a description that trims to nothing. An empty item list
/// is not an error here; it simply earns 0. Rejecting it is the
/// validator's job, not the engine's.
pub fn item_points(receipt: &Receipt) -> u64 {
    let mut points = (receipt.items.len() as u64 / 2) * 5;
    for item in &receipt.items {
        if item.short_description.trim().chars().count() % 3 == 0 {
            points += item.price.fifth_rounded_up();
        }
    }
    event!(Level::DEBUG, points, "items rule");
    points
}

/// Points from when the purchase happened: 6 for an odd day of the month,
/// 10 for a purchase strictly inside the 14:00 to 16:00 window.
pub fn date_time_points(receipt: &Receipt) -> u64 {
    let mut points = 0;
    if receipt.purchase_date.day() % 2 == 1 {
        points += 6;
    }
    let at = *receipt.purchase_time;
    if at > WINDOW_OPEN && at < WINDOW_CLOSE {
        points += 10;
    }
    event!(Level::DEBUG, points, "purchase date/time rule");
    points
}
