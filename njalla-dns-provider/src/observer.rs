//! Operation observer hook.
//!
//! Record operations report their outcome through return values. Hosts that
//! want a side channel (audit trail, metrics, UI updates) register an
//! [`OperationObserver`] on the provider builder and receive one
//! [`OperationEvent`] per successful operation.

use serde::Serialize;

/// Event emitted after a provider operation succeeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum OperationEvent {
    /// `authenticate()` verified the domain.
    Authenticated {
        /// Authenticated domain.
        domain: String,
    },
    /// A record was created.
    Created {
        /// Identifier assigned by the remote service, when returned.
        record_id: Option<String>,
        /// Remote `result` payload.
        raw: serde_json::Value,
    },
    /// Records were listed.
    Listed {
        /// Number of records fetched from the remote service.
        fetched: usize,
        /// Number of records left after filtering.
        matched: usize,
    },
    /// A record's content was updated.
    Updated {
        /// Identifier of the updated record.
        record_id: String,
        /// Remote `result` payload.
        raw: serde_json::Value,
    },
    /// A record was removed.
    Deleted {
        /// Identifier of the removed record.
        record_id: String,
    },
    /// A delete matched no record and was skipped.
    DeleteSkipped,
}

/// Receives [`OperationEvent`]s from a provider.
///
/// Called synchronously on the operation's task, after the remote call completed.
pub trait OperationObserver: Send + Sync {
    /// Handle one event.
    fn on_event(&self, event: &OperationEvent);
}

impl<F> OperationObserver for F
where
    F: Fn(&OperationEvent) + Send + Sync,
{
    fn on_event(&self, event: &OperationEvent) {
        self(event);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[test]
    fn closures_are_observers() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let observer = move |event: &OperationEvent| {
            sink.lock().unwrap().push(event.clone());
        };

        observer.on_event(&OperationEvent::DeleteSkipped);
        assert_eq!(*seen.lock().unwrap(), vec![OperationEvent::DeleteSkipped]);
    }

    #[test]
    fn events_serialize_with_tag() {
        let json = serde_json::to_value(OperationEvent::Listed {
            fetched: 3,
            matched: 1,
        })
        .unwrap();
        assert_eq!(json["event"], "listed");
        assert_eq!(json["matched"], 1);
    }
}
