//! # Price Normalization
//!
//! Detected prices arrive as free text read off shelf labels: `"12,50 €"`,
//! `"$3.99"`, `"1.234,00 zł"` or plain OCR noise. [`normalize`] turns a token
//! into a positive decimal or a [`PriceRejection`]. It never panics and never
//! fails a caller; a rejected token only means the record is left out of price
//! statistics.
//!
//! Separator rules:
//! - one separator (`.` or `,`) is the decimal separator
//! - repeated identical separators (`1.234.567`) are thousands grouping
//! - mixed separators (`1.234,50`, `1,234.50`): the last one is the decimal
//!   separator and the others are grouping
//!
//! Grouping must be well formed: a lead group of one to three digits followed
//! by groups of exactly three. Only ASCII digits are accepted.

use bigdecimal::{BigDecimal, Zero};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Currency markers accepted before or after the amount
const CURRENCY_MARKERS: &str = r"€|\$|£|¥|₺|₽|zł|eur|usd|gbp|pln|rub|try|tl";

static PRICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?:(?P<lead>{CURRENCY_MARKERS})\s*)?(?P<amount>[0-9]+(?:[.,][0-9]+)*)(?:\s*(?P<trail>{CURRENCY_MARKERS}))?$"
    ))
    .expect("price pattern is a valid regex")
});

/// Why a price token was not usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceRejection {
    #[error("no price was detected")]
    Missing,
    #[error("price token is empty")]
    Empty,
    #[error("price token is not a number with an optional currency")]
    Malformed,
    #[error("price must be greater than zero")]
    NonPositive,
}

/// Parse a raw detected price
pub fn normalize(raw: Option<&str>) -> Result<BigDecimal, PriceRejection> {
    let raw = raw.ok_or(PriceRejection::Missing)?;
    normalize_token(raw)
}

/// Parse a price token that is known to be present
pub fn normalize_token(raw: &str) -> Result<BigDecimal, PriceRejection> {
    let token = raw.trim();
    if token.is_empty() {
        return Err(PriceRejection::Empty);
    }

    let captures = PRICE_PATTERN
        .captures(token)
        .ok_or(PriceRejection::Malformed)?;

    // One currency marker at most
    if captures.name("lead").is_some() && captures.name("trail").is_some() {
        return Err(PriceRejection::Malformed);
    }

    let amount = captures
        .name("amount")
        .map(|m| m.as_str())
        .ok_or(PriceRejection::Malformed)?;

    let canonical = canonical_amount(amount).ok_or(PriceRejection::Malformed)?;
    let value = BigDecimal::from_str(&canonical).map_err(|_| PriceRejection::Malformed)?;

    if value <= BigDecimal::zero() {
        return Err(PriceRejection::NonPositive);
    }

    Ok(value)
}

/// Rewrite a matched amount into `digits[.digits]`, or `None` when the
/// grouping is not thousands grouping
fn canonical_amount(amount: &str) -> Option<String> {
    let separators: Vec<char> = amount.chars().filter(|c| matches!(c, '.' | ',')).collect();

    match separators.as_slice() {
        [] => Some(amount.to_string()),
        [_] => Some(amount.replace(',', ".")),
        [first, rest @ ..] if rest.iter().all(|c| c == first) => ungroup(amount, *first),
        [.., last] => {
            let (whole, fraction) = amount.rsplit_once(*last)?;
            let grouping = if *last == '.' { ',' } else { '.' };
            if whole.contains(*last) {
                return None;
            }
            Some(format!("{}.{fraction}", ungroup(whole, grouping)?))
        }
    }
}

/// Strip thousands separators, checking group widths
fn ungroup(digits: &str, separator: char) -> Option<String> {
    let mut groups = digits.split(separator);
    let lead = groups.next()?;
    if lead.is_empty() || lead.len() > 3 {
        return None;
    }
    let mut plain = lead.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        plain.push_str(group);
    }
    Some(plain)
}
