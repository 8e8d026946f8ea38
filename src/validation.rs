//! Input validation for request parameters
//!
//! Checks caller-supplied limits, windows and scopes before any store read.

use crate::constants::analytics::{MAX_RECENT_ACTIVITY_DAYS, MAX_TOP_N};
use crate::error::{AuditError, Result};
use crate::models::AggregationScope;

/// Validates a top-N limit and returns it as `usize`
pub fn validate_top_n(limit: i64) -> Result<usize> {
    if limit < 1 || limit > MAX_TOP_N as i64 {
        return Err(AuditError::InvalidInput(format!(
            "limit must be between 1 and {MAX_TOP_N}, got {limit}"
        )));
    }
    Ok(limit as usize)
}

/// Validates a recent-activity window in days
pub fn validate_window_days(days: i64) -> Result<u32> {
    if days < 1 || days > i64::from(MAX_RECENT_ACTIVITY_DAYS) {
        return Err(AuditError::InvalidInput(format!(
            "days must be between 1 and {MAX_RECENT_ACTIVITY_DAYS}, got {days}"
        )));
    }
    Ok(days as u32)
}

/// Validates the filters of an aggregation scope
pub fn validate_scope(scope: &AggregationScope) -> Result<()> {
    if let Some(store_id) = scope.store_id {
        if store_id <= 0 {
            return Err(AuditError::InvalidInput(format!(
                "store_id must be positive, got {store_id}"
            )));
        }
    }

    if let Some(chain) = &scope.chain {
        if chain.trim().is_empty() {
            return Err(AuditError::InvalidInput(
                "chain must not be blank".to_string(),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_n_bounds() {
        assert_eq!(validate_top_n(1).unwrap(), 1);
        assert_eq!(validate_top_n(100).unwrap(), 100);
        assert!(validate_top_n(0).is_err());
        assert!(validate_top_n(101).is_err());
        assert!(validate_top_n(-3).is_err());
    }

    #[test]
    fn test_window_days_bounds() {
        assert_eq!(validate_window_days(7).unwrap(), 7);
        assert!(validate_window_days(0).is_err());
        assert!(validate_window_days(366).is_err());
    }

    #[test]
    fn test_scope_validation() {
        assert!(validate_scope(&AggregationScope::all()).is_ok());
        assert!(validate_scope(&AggregationScope::for_store(5)).is_ok());
        assert!(validate_scope(&AggregationScope::for_store(0)).is_err());

        let blank_chain = AggregationScope {
            store_id: None,
            chain: Some("  ".to_string()),
        };
        assert!(matches!(
            validate_scope(&blank_chain),
            Err(AuditError::InvalidInput(_))
        ));
    }
}
