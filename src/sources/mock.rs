//! Mock source for testing purposes.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::models::WorksPage;
use crate::sources::{PageRequest, SourceError, WorksSource};

/// A canned upstream reply
#[derive(Debug, Clone)]
pub enum MockReply {
    /// A JSON body, decoded the same way a real response would be
    Body(Value),
    /// A network failure with the given message
    NetworkError(String),
    /// A body that only arrives after the given delay
    Delayed(Duration, Value),
}

/// A mock source that replays predefined response bodies in order.
///
/// Once the queue is exhausted the `fallback` reply is returned for every call
/// (an empty envelope unless configured otherwise). Every request is recorded.
#[derive(Debug)]
pub struct MockWorksSource {
    replies: Mutex<VecDeque<MockReply>>,
    fallback: MockReply,
    requests: Mutex<Vec<PageRequest>>,
}

impl Default for MockWorksSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockWorksSource {
    /// Create a mock with no queued replies.
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: MockReply::Body(page_body(Vec::new())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that replays the given bodies in order.
    pub fn with_bodies(bodies: Vec<Value>) -> Self {
        let mock = Self::new();
        for body in bodies {
            mock.push_reply(MockReply::Body(body));
        }
        mock
    }

    /// Create a mock that returns the same body forever.
    pub fn always(body: Value) -> Self {
        Self {
            fallback: MockReply::Body(body),
            ..Self::new()
        }
    }

    /// Queue another reply.
    pub fn push_reply(&self, reply: MockReply) {
        let mut guard = self.replies.lock().unwrap();
        guard.push_back(reply);
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl WorksSource for MockWorksSource {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn fetch_page(&self, request: &PageRequest) -> Result<Option<WorksPage>, SourceError> {
        self.requests.lock().unwrap().push(request.clone());

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match reply {
            MockReply::Body(body) => Ok(WorksPage::from_json(body)?),
            MockReply::NetworkError(message) => Err(SourceError::Network(message)),
            MockReply::Delayed(delay, body) => {
                tokio::time::sleep(delay).await;
                Ok(WorksPage::from_json(body)?)
            }
        }
    }
}

/// Helper to build a work record with one author.
pub fn make_item(title: &str, given: &str, family: &str) -> Value {
    json!({
        "title": [title],
        "URL": format!("http://dx.doi.org/10.0000/{}", title.replace(' ', "-")),
        "issued": {"date-parts": [[2020, 1, 1]]},
        "is-referenced-by-count": 1,
        "author": [{"given": given, "family": family, "sequence": "first"}]
    })
}

/// Helper to build `n` records that all match the default filter tokens.
pub fn matching_items(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| make_item(&format!("Paper {}", i), "Brad E.", "Dicianno"))
        .collect()
}

/// Wrap records in the `{message: {items: [...]}}` envelope.
pub fn page_body(items: Vec<Value>) -> Value {
    json!({
        "status": "ok",
        "message-type": "work-list",
        "message": {"total-results": items.len(), "items": items}
    })
}
