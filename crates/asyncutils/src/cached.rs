use crate::memo::Memo;
use std::fmt::{Debug, Formatter, Result as FmtResult};

/// Compute-once cache for a zero-argument async producer.
///
/// Concurrent callers racing on an empty cache wait for a single computation
/// rather than each running the producer; the first caller to acquire the
/// cell runs it and everybody else receives the stored value.
pub struct Cached<T, E> {
    memo: Memo<T, E>,
}

impl<T, E> Cached<T, E> {
    pub fn new<F, Fut>(producer_fn: F) -> Self
    where
        T: 'static,
        E: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self { memo: Memo::new(producer_fn) }
    }

    /// Return the stored value, running the producer first if the cache is empty.
    pub async fn get(&self) -> Result<&T, E> {
        self.memo.get().await
    }

    /// Return the stored value without ever running the producer.
    pub fn peek(&self) -> Option<&T> {
        self.memo.peek()
    }

    pub fn is_populated(&self) -> bool {
        self.memo.is_set()
    }

    /// Empty the cache, returning the previously stored value (if any).
    ///
    /// The next call to [`get`](Self::get) runs the producer again.
    pub fn reset(&mut self) -> Option<T> {
        self.memo.take()
    }
}

impl<T, E> Debug for Cached<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Cached").field("populated", &self.is_populated()).finish_non_exhaustive()
    }
}
