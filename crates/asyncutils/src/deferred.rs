use crate::memo::Memo;
use futures::future::BoxFuture;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::future::IntoFuture;

/// A not-yet-materialized value, resolved on first await.
///
/// The producer (usually a closure capturing its fixed arguments) only runs
/// when the handle is forced with [`get`](Self::get) or by awaiting a
/// reference to it. Once resolved, the value is kept for the lifetime of the
/// handle.
///
/// Cloning produces an independent handle: a clone of a resolved handle
/// carries a copy of the value, and a clone of an unresolved handle shares
/// the producer but resolves on its own.
pub struct Deferred<T, E> {
    memo: Memo<T, E>,
}

impl<T, E> Deferred<T, E> {
    pub fn new<F, Fut>(producer_fn: F) -> Self
    where
        T: 'static,
        E: 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Self { memo: Memo::new(producer_fn) }
    }

    /// Force the handle, running the producer unless already resolved.
    pub async fn get(&self) -> Result<&T, E> {
        self.memo.get().await
    }

    pub fn peek(&self) -> Option<&T> {
        self.memo.peek()
    }

    pub fn is_resolved(&self) -> bool {
        self.memo.is_set()
    }

    /// Consume the handle, returning the value only if it was already resolved.
    pub fn into_inner(self) -> Option<T> {
        self.memo.into_inner()
    }
}

impl<T: Clone, E> Clone for Deferred<T, E> {
    fn clone(&self) -> Self {
        Self { memo: self.memo.clone() }
    }
}

impl<'a, T, E> IntoFuture for &'a Deferred<T, E>
where
    T: Send + Sync + 'a,
    E: Send + 'a,
{
    type Output = Result<&'a T, E>;
    type IntoFuture = BoxFuture<'a, Result<&'a T, E>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.get())
    }
}

impl<T, E> Debug for Deferred<T, E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let state = if self.is_resolved() { "resolved" } else { "unresolved" };
        f.debug_tuple("Deferred").field(&format_args!("{state}")).finish()
    }
}
