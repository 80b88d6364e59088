//! # Context Protocol
//!
//! Lets graph elements take part in membership changes.
//!
//! Every mutation of a container runs in two phases:
//! 1. **Veto**: each affected element is asked whether it is willing to
//!    join or leave (`joining_graph`, `leaving_graph`, `connecting_edge`,
//!    `disconnecting_edge`). Any `Err(Rejected)` aborts the whole mutation
//!    before state is touched.
//! 2. **Notify**: after the change is applied, the same elements hear about
//!    it (`joined_graph`, `left_graph`, `connected_edge`, `disconnected_edge`).
//!
//! Elements whose `is_context_enabled` returns `false` are skipped in both
//! phases. State signals ([`StateSignal`]) are the exception: they are
//! delivered regardless of that switch.

use crate::{EdgeId, GraphId, NodeId};
use thiserror::Error;

// =============================================================================
// VETO OUTCOMES
// =============================================================================

/// An element agreed to the proposed membership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accepted;

/// An element refused the proposed membership change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct Rejected {
    reason: String,
}

impl Rejected {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Answer to a veto question.
pub type ContextResult = Result<Accepted, Rejected>;

/// Outcome of a container mutation.
///
/// A rejection is an ordinary outcome, not an error: the container is
/// unchanged and the caller decides what to do next.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation<T> {
    /// The mutation went through.
    Applied(T),
    /// An element vetoed the mutation; nothing changed.
    Rejected(Rejected),
}

impl<T> Mutation<T> {
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    #[must_use]
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The applied value, discarding a rejection.
    pub fn applied(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }

    #[must_use]
    pub fn rejection(&self) -> Option<&Rejected> {
        match self {
            Self::Applied(_) => None,
            Self::Rejected(rejected) => Some(rejected),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Mutation<U> {
        match self {
            Self::Applied(value) => Mutation::Applied(f(value)),
            Self::Rejected(rejected) => Mutation::Rejected(rejected),
        }
    }
}

// =============================================================================
// ELEMENT CALLBACKS
// =============================================================================

/// Membership callbacks shared by node and edge payloads.
///
/// All methods have permissive defaults, so an implementation only
/// overrides what it cares about.
pub trait ElementContext {
    /// When `false`, the container skips every callback on this element.
    fn is_context_enabled(&self) -> bool {
        true
    }

    fn joining_graph(&self, _graph: GraphId) -> ContextResult {
        Ok(Accepted)
    }

    fn joined_graph(&mut self, _graph: GraphId) {}

    fn leaving_graph(&self, _graph: GraphId) -> ContextResult {
        Ok(Accepted)
    }

    fn left_graph(&mut self, _graph: GraphId) {}
}

/// Extra callbacks for node payloads: a node may refuse incident edges.
pub trait NodeContext: ElementContext {
    fn connecting_edge(&self, _graph: GraphId, _edge: EdgeId) -> ContextResult {
        Ok(Accepted)
    }

    fn connected_edge(&mut self, _graph: GraphId, _edge: EdgeId) {}

    fn disconnecting_edge(&self, _graph: GraphId, _edge: EdgeId) -> ContextResult {
        Ok(Accepted)
    }

    fn disconnected_edge(&mut self, _graph: GraphId, _edge: EdgeId) {}
}

/// Receiver of application-level state changes.
///
/// `Graph::propagate_state` calls this on every edge traversable from the
/// changed node and on every node reached across those edges.
pub trait StateSignal<S> {
    fn node_state_changed(&mut self, origin: NodeId, state: &S);
}

impl<S> StateSignal<S> for () {
    fn node_state_changed(&mut self, _origin: NodeId, _state: &S) {}
}

/// Pure-data payloads: context disabled, no callbacks.
macro_rules! pure_data_context {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ElementContext for $ty {
                fn is_context_enabled(&self) -> bool {
                    false
                }
            }

            impl NodeContext for $ty {}
        )*
    };
}

pure_data_context!(
    (),
    bool,
    String,
    &'static str,
    f32,
    f64,
    i32,
    i64,
    u32,
    u64,
    usize,
);

/// Ask an element a veto question, honouring its context switch.
pub(crate) fn vet<T, F>(element: &T, ask: F) -> ContextResult
where
    T: ElementContext + ?Sized,
    F: FnOnce(&T) -> ContextResult,
{
    if element.is_context_enabled() {
        ask(element)
    } else {
        Ok(Accepted)
    }
}

/// Deliver a notification to an element, honouring its context switch.
pub(crate) fn notify<T, F>(element: &mut T, tell: F)
where
    T: ElementContext + ?Sized,
    F: FnOnce(&mut T),
{
    if element.is_context_enabled() {
        tell(element);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Picky {
        enabled: bool,
    }

    impl ElementContext for Picky {
        fn is_context_enabled(&self) -> bool {
            self.enabled
        }

        fn joining_graph(&self, graph: GraphId) -> ContextResult {
            Err(Rejected::new(format!("not joining {:?}", graph)))
        }
    }

    #[test]
    fn vet_skips_disabled_elements() {
        let picky = Picky { enabled: false };
        assert!(vet(&picky, |p| p.joining_graph(GraphId(1))).is_ok());
    }

    #[test]
    fn vet_asks_enabled_elements() {
        let picky = Picky { enabled: true };
        let answer = vet(&picky, |p| p.joining_graph(GraphId(1)));
        assert_eq!(
            answer.err().map(|r| r.reason().to_string()),
            Some("not joining GraphId(1)".to_string())
        );
    }

    #[test]
    fn pure_data_payloads_have_context_disabled() {
        assert!(!().is_context_enabled());
        assert!(!String::from("x").is_context_enabled());
        assert!(!1.5f64.is_context_enabled());
    }

    #[test]
    fn mutation_helpers() {
        let applied: Mutation<u8> = Mutation::Applied(3);
        assert!(applied.is_applied());
        assert_eq!(applied.clone().map(|v| v * 2).applied(), Some(6));

        let rejected: Mutation<u8> = Mutation::Rejected(Rejected::new("no"));
        assert!(rejected.is_rejected());
        assert_eq!(rejected.rejection().map(Rejected::reason), Some("no"));
        assert_eq!(rejected.applied(), None);
    }

    #[test]
    fn rejection_displays_its_reason() {
        let rejected = Rejected::new("sealed");
        assert_eq!(rejected.to_string(), "sealed");
        let as_error: &dyn std::error::Error = &rejected;
        assert!(as_error.source().is_none());
    }
}
