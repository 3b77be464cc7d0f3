use futures::future::BoxFuture;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// A repeatable async computation, shareable between clones of a cell.
type Producer<T, E> = Arc<dyn Fn() -> BoxFuture<'static, Result<T, E>> + Send + Sync>;

/// A producer paired with the slot its first successful result lands in.
///
/// Both public cell types wrap this; they only differ in how they are owned
/// and what they expose.
pub(crate) struct Memo<T, E> {
    producer: Producer<T, E>,
    cell: OnceCell<T>,
}

impl<T, E> Memo<T, E> {
    pub(crate) fn new<F, Fut>(producer: F) -> Self
    where
        T: 'static,
        E: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        let producer: Producer<T, E> = Arc::new(move || -> BoxFuture<'static, Result<T, E>> { Box::pin(producer()) });
        Self { producer, cell: OnceCell::new() }
    }

    /// Run the producer unless a value is already stored. Concurrent callers
    /// wait on the same computation; a failed or dropped one stores nothing.
    pub(crate) async fn get(&self) -> Result<&T, E> {
        self.cell.get_or_try_init(|| (self.producer)()).await
    }

    pub(crate) fn peek(&self) -> Option<&T> {
        self.cell.get()
    }

    pub(crate) fn is_set(&self) -> bool {
        self.cell.initialized()
    }

    pub(crate) fn take(&mut self) -> Option<T> {
        self.cell.take()
    }

    pub(crate) fn into_inner(self) -> Option<T> {
        self.cell.into_inner()
    }
}

/// Shares the producer; the stored value (if any) is copied.
impl<T: Clone, E> Clone for Memo<T, E> {
    fn clone(&self) -> Self {
        Self { producer: Arc::clone(&self.producer), cell: self.cell.clone() }
    }
}
