//! Reactive Primitives
//!
//! Small event-stream toolkit the view models are written against:
//! - [`Subject`] - passthrough event source (values sent before anyone
//!   subscribes are dropped)
//! - [`CurrentValueSubject`] - holds a current value, new subscribers see it first
//! - [`Publisher`] - read-only, multi-subscriber output handed to the UI
//! - [`DisposeBag`] - owns side-effect tasks and aborts them on drop
//!
//! ## Subscription timing
//! Subscribing is synchronous. A stream obtained from `subscribe()` buffers
//! every value sent after the call, even if it is polled much later.
//!
//! ## Ordering
//! Every emission carries a process-wide sequence number taken at send time.
//! [`ordered`] merges several sources back into send order, so events sent
//! one after another on different subjects are seen in that order.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::task::{Context, Poll};

use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use parking_lot::Mutex;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::{BroadcastStream, WatchStream};

/// Per-subscriber buffer of a [`Subject`]
pub const SUBJECT_CAPACITY: usize = 64;

// ============================================================================
// Sequencing
// ============================================================================

static NEXT_SEQ: AtomicU64 = AtomicU64::new(0);

/// A value and the position of its send among all emissions
#[derive(Debug, Clone)]
pub(crate) struct Stamped<T> {
    pub(crate) seq: u64,
    pub(crate) value: T,
}

impl<T> Stamped<T> {
    fn now(value: T) -> Self {
        Self {
            seq: NEXT_SEQ.fetch_add(1, Ordering::Relaxed),
            value,
        }
    }

    pub(crate) fn map<U>(self, f: impl FnOnce(T) -> U) -> Stamped<U> {
        Stamped {
            seq: self.seq,
            value: f(self.value),
        }
    }
}

/// Stream of stamped emissions
pub(crate) type EventStream<T> = BoxStream<'static, Stamped<T>>;

/// Merge `sources` so items come out in send order
///
/// A source with nothing buffered when an item is picked holds nothing older,
/// because its earlier sends completed before the picked item was stamped.
pub(crate) fn ordered<T: Send + 'static>(sources: Vec<EventStream<T>>) -> EventStream<T> {
    OrderedMerge {
        sources: sources
            .into_iter()
            .map(|stream| Source {
                stream,
                head: None,
                done: false,
            })
            .collect(),
    }
    .boxed()
}

struct Source<T> {
    stream: EventStream<T>,
    head: Option<Stamped<T>>,
    done: bool,
}

struct OrderedMerge<T> {
    sources: Vec<Source<T>>,
}

// Heads are moved out by value, never pinned
impl<T> Unpin for OrderedMerge<T> {}

impl<T> Stream for OrderedMerge<T> {
    type Item = Stamped<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // Refill until a whole pass, made after every head was seen, adds nothing
        loop {
            let mut filled = false;
            for source in this.sources.iter_mut().filter(|s| s.head.is_none() && !s.done) {
                match source.stream.poll_next_unpin(cx) {
                    Poll::Ready(Some(item)) => {
                        source.head = Some(item);
                        filled = true;
                    }
                    Poll::Ready(None) => source.done = true,
                    Poll::Pending => {}
                }
            }
            if !filled {
                break;
            }
        }

        let oldest = this
            .sources
            .iter()
            .enumerate()
            .filter_map(|(index, s)| s.head.as_ref().map(|head| (head.seq, index)))
            .min();
        match oldest {
            Some((_, index)) => Poll::Ready(this.sources[index].head.take()),
            None if this.sources.iter().all(|s| s.done) => Poll::Ready(None),
            None => Poll::Pending,
        }
    }
}

// ============================================================================
// Publisher
// ============================================================================

type StreamFactory<T> = dyn Fn() -> EventStream<T> + Send + Sync;

/// Lazily subscribed output stream
///
/// Every `subscribe()` produces an independent stream; nothing runs until a
/// subscriber polls it.
pub struct Publisher<T> {
    factory: Arc<StreamFactory<T>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            factory: self.factory.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Publisher")
    }
}

impl<T: Send + 'static> Publisher<T> {
    fn new(factory: impl Fn() -> EventStream<T> + Send + Sync + 'static) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    pub fn subscribe(&self) -> BoxStream<'static, T> {
        self.events().map(|item| item.value).boxed()
    }

    pub(crate) fn events(&self) -> EventStream<T> {
        (self.factory)()
    }

    /// Project every value
    pub fn map<U, F>(&self, f: F) -> Publisher<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let f = Arc::new(f);
        Publisher::new(move || {
            let f = f.clone();
            source.events().map(move |item| item.map(|value| f(value))).boxed()
        })
    }

    /// Interleave with another publisher of the same type, in send order
    pub fn merge(&self, other: &Publisher<T>) -> Publisher<T> {
        let left = self.clone();
        let right = other.clone();
        Publisher::new(move || ordered(vec![left.events(), right.events()]))
    }
}

// ============================================================================
// Subject
// ============================================================================

/// Passthrough subject over a broadcast channel
pub struct Subject<T> {
    sender: broadcast::Sender<Stamped<T>>,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subject")
            .field("subscribers", &self.sender.receiver_count())
            .finish()
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SUBJECT_CAPACITY);
        Self { sender }
    }

    /// Deliver to every current subscriber
    pub fn send(&self, value: T) {
        // No subscribers is not an error for a passthrough subject
        let _ = self.sender.send(Stamped::now(value));
    }

    pub fn subscribe(&self) -> BoxStream<'static, T> {
        self.events().map(|item| item.value).boxed()
    }

    pub(crate) fn events(&self) -> EventStream<T> {
        broadcast_stream(&self.sender)
    }

    pub fn publisher(&self) -> Publisher<T> {
        let sender = self.sender.clone();
        Publisher::new(move || broadcast_stream(&sender))
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

fn broadcast_stream<T: Clone + Send + 'static>(
    sender: &broadcast::Sender<Stamped<T>>,
) -> EventStream<T> {
    BroadcastStream::new(sender.subscribe())
        .filter_map(|item| async move {
            match item {
                Ok(value) => Some(value),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Subscriber lagged; events dropped");
                    None
                }
            }
        })
        .boxed()
}

// ============================================================================
// CurrentValueSubject
// ============================================================================

/// Subject that always has a value
pub struct CurrentValueSubject<T> {
    sender: Arc<watch::Sender<Stamped<T>>>,
}

impl<T> Clone for CurrentValueSubject<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CurrentValueSubject<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("CurrentValueSubject")
            .field(&self.sender.borrow().value)
            .finish()
    }
}

impl<T: Clone + Send + Sync + 'static> CurrentValueSubject<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(Stamped::now(initial));
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn value(&self) -> T {
        self.sender.borrow().value.clone()
    }

    pub fn send(&self, value: T) {
        self.sender.send_replace(Stamped::now(value));
    }

    pub fn send_modify(&self, modify: impl FnOnce(&mut T)) {
        self.sender.send_modify(|current| {
            modify(&mut current.value);
            current.seq = NEXT_SEQ.fetch_add(1, Ordering::Relaxed);
        });
    }

    /// Current value first, then every change
    pub fn subscribe(&self) -> BoxStream<'static, T> {
        WatchStream::new(self.sender.subscribe())
            .map(|item| item.value)
            .boxed()
    }

    pub fn publisher(&self) -> Publisher<T> {
        let sender = self.sender.clone();
        Publisher::new(move || WatchStream::new(sender.subscribe()).boxed())
    }
}

// ============================================================================
// DisposeBag
// ============================================================================

/// Owner of side-effect tasks; aborts them when dropped
#[derive(Default)]
pub struct DisposeBag {
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl DisposeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn `task` on the runtime, tied to this bag
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        let mut tasks = self.tasks.lock();
        tasks.retain(|t| !t.is_finished());
        tasks.push(handle);
    }

    /// Number of tasks still running
    pub fn live_tasks(&self) -> usize {
        self.tasks.lock().iter().filter(|t| !t.is_finished()).count()
    }

    /// Abort every task now
    pub fn dispose(&self) {
        for task in self.tasks.lock().drain(..) {
            task.abort();
        }
    }
}

impl Drop for DisposeBag {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for DisposeBag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisposeBag")
            .field("tasks", &self.tasks.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    const WAIT: Duration = Duration::from_secs(1);

    #[tokio::test]
    async fn test_subject_buffers_after_subscribe() {
        let subject = Subject::new();
        subject.send(0);
        let mut stream = subject.subscribe();
        subject.send(1);
        subject.send(2);

        assert_eq!(timeout(WAIT, stream.next()).await.unwrap(), Some(1));
        assert_eq!(timeout(WAIT, stream.next()).await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_publisher_map_is_per_subscriber() {
        let subject = Subject::new();
        let doubled = subject.publisher().map(|v: i32| v * 2);
        let mut a = doubled.subscribe();
        let mut b = doubled.subscribe();
        subject.send(21);

        assert_eq!(timeout(WAIT, a.next()).await.unwrap(), Some(42));
        assert_eq!(timeout(WAIT, b.next()).await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_current_value_subject_replays_current() {
        let subject = CurrentValueSubject::new("a".to_string());
        subject.send("b".to_string());
        let mut stream = subject.subscribe();

        assert_eq!(timeout(WAIT, stream.next()).await.unwrap().as_deref(), Some("b"));
        subject.send_modify(|v| v.push('!'));
        assert_eq!(timeout(WAIT, stream.next()).await.unwrap().as_deref(), Some("b!"));
        assert_eq!(subject.value(), "b!");
    }

    #[tokio::test]
    async fn test_ordered_follows_send_order_across_subjects() {
        let text = Subject::new();
        let tap = Subject::new();
        let mut merged = ordered(vec![
            text.events().map(|item| item.map(|t: &str| t.to_string())).boxed(),
            tap.events().map(|item| item.map(|()| "tap".to_string())).boxed(),
        ]);

        tap.send(());
        text.send("20");
        tap.send(());
        text.send("21");

        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(timeout(WAIT, merged.next()).await.unwrap().unwrap().value);
        }
        assert_eq!(seen, ["tap", "20", "tap", "21"]);
    }

    #[tokio::test]
    async fn test_ordered_ends_when_every_source_ends() {
        let merged = ordered(vec![
            futures::stream::iter([Stamped::now(1)]).boxed(),
            futures::stream::empty().boxed(),
        ]);
        let values: Vec<i32> = merged.map(|item| item.value).collect().await;
        assert_eq!(values, [1]);
    }

    #[tokio::test]
    async fn test_merged_publisher_keeps_send_order() {
        let left = Subject::new();
        let right = Subject::new();
        let merged = left.publisher().merge(&right.publisher());
        let mut stream = merged.subscribe();

        right.send(1);
        left.send(2);
        right.send(3);

        assert_eq!(timeout(WAIT, stream.next()).await.unwrap(), Some(1));
        assert_eq!(timeout(WAIT, stream.next()).await.unwrap(), Some(2));
        assert_eq!(timeout(WAIT, stream.next()).await.unwrap(), Some(3));
    }

    #[tokio::test]
    async fn test_dispose_bag_aborts_on_drop() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<()>();
        let bag = DisposeBag::new();
        bag.spawn(async move {
            let _tx = tx;
            futures::future::pending::<()>().await;
        });
        assert_eq!(bag.live_tasks(), 1);

        drop(bag);
        // Sender is dropped with the aborted task
        assert_eq!(timeout(WAIT, rx.recv()).await.unwrap(), None);
    }
}
