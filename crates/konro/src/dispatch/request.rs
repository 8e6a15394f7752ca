use tokio::sync::oneshot;
use uuid::Uuid;

use crate::error::Error;
use crate::message::Message;

/// # Request
///
/// One submitted unit of work: a conversation paired with a one-shot result
/// slot.
///
/// A request is created by a producer, consumed exactly once by the worker,
/// and dropped after its result has been delivered. The one-shot sender is
/// consumed by [`fulfill`](Request::fulfill), so the result slot cannot be
/// written twice by construction.
pub(crate) struct Request {
    /// Tag for log correlation across enqueue and service.
    id: Uuid,

    /// The conversation to generate a reply for.
    messages: Vec<Message>,

    /// Single-assignment result slot.
    responder: oneshot::Sender<Result<String, Error>>,
}

impl Request {
    pub fn new(messages: Vec<Message>, responder: oneshot::Sender<Result<String, Error>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            messages,
            responder,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Resolve the result slot, consuming the request.
    ///
    /// The receiver may already be gone if the producer's task was
    /// cancelled; that is not an error here.
    pub fn fulfill(self, result: Result<String, Error>) {
        let _ = self.responder.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fulfill_delivers_the_result() {
        let (tx, rx) = oneshot::channel();
        let request = Request::new(vec![Message::user("hi")], tx);

        assert_eq!(request.messages().len(), 1);
        request.fulfill(Ok("reply".to_string()));

        assert_eq!(rx.await.unwrap(), Ok("reply".to_string()));
    }

    #[tokio::test]
    async fn fulfill_with_dropped_receiver_does_not_panic() {
        let (tx, rx) = oneshot::channel();
        let request = Request::new(vec![], tx);
        drop(rx);

        request.fulfill(Err(Error::QueueStopped));
    }

    #[test]
    fn ids_are_distinct() {
        let (tx1, _rx1) = oneshot::channel();
        let (tx2, _rx2) = oneshot::channel();
        let a = Request::new(vec![], tx1);
        let b = Request::new(vec![], tx2);
        assert_ne!(a.id(), b.id());
    }
}
