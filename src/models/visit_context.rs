//! # Visit Context
//!
//! Where an agent currently is, as far as the caller knows. Every field is
//! optional on the wire; only the agent is required before tasks can be
//! resolved, which [`VisitContext::into_agent_visit`] enforces.

use crate::error::{AuditError, Result};
use serde::{Deserialize, Serialize};

/// Partial visit description as received from a caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitContext {
    pub agent_id: Option<i64>,
    pub chain: Option<String>,
    pub store_id: Option<i64>,
    pub area: Option<String>,
}

/// A visit context with a known agent, ready for resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentVisit {
    pub agent_id: i64,
    pub chain: Option<String>,
    pub store_id: Option<i64>,
    pub area: Option<String>,
}

impl VisitContext {
    pub fn for_agent(agent_id: i64) -> Self {
        Self {
            agent_id: Some(agent_id),
            ..Self::default()
        }
    }

    pub fn with_chain(mut self, chain: impl Into<String>) -> Self {
        self.chain = Some(chain.into());
        self
    }

    pub fn with_store(mut self, store_id: i64) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Validate the context. Blank chain/area hints are dropped.
    pub fn into_agent_visit(self) -> Result<AgentVisit> {
        let agent_id = self
            .agent_id
            .ok_or_else(|| AuditError::InvalidInput("agent_id is required".to_string()))?;

        if agent_id <= 0 {
            return Err(AuditError::InvalidInput(format!(
                "agent_id must be positive, got {agent_id}"
            )));
        }

        Ok(AgentVisit {
            agent_id,
            chain: non_blank(self.chain),
            store_id: self.store_id,
            area: non_blank(self.area),
        })
    }
}

impl AgentVisit {
    /// True when the caller gave at least one of chain, store or area
    pub fn has_scoping_hints(&self) -> bool {
        self.chain.is_some() || self.store_id.is_some() || self.area.is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_agent_is_invalid_input() {
        let err = VisitContext::default()
            .with_chain("X")
            .into_agent_visit()
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_non_positive_agent_is_rejected() {
        assert!(VisitContext::for_agent(0).into_agent_visit().is_err());
        assert!(VisitContext::for_agent(-3).into_agent_visit().is_err());
    }

    #[test]
    fn test_blank_hints_are_dropped() {
        let visit = VisitContext::for_agent(7)
            .with_chain(" ")
            .with_area("North")
            .into_agent_visit()
            .unwrap();
        assert_eq!(visit.chain, None);
        assert_eq!(visit.area.as_deref(), Some("North"));
        assert!(visit.has_scoping_hints());
    }

    #[test]
    fn test_agent_only_has_no_hints() {
        let visit = VisitContext::for_agent(7).into_agent_visit().unwrap();
        assert!(!visit.has_scoping_hints());
    }
}
