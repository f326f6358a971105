//! Bound - instance に束縛されたハンドル
//!
//! `Dispatcher::bind` returns a fresh handle on every access, so the latest
//! access always decides which instance a call operates on and no state is
//! written back to the shared dispatcher.

use std::fmt;

use super::dispatcher::Dispatcher;
use crate::domain::Signature;

pub struct Bound<'a, T, V, A, R, N = V> {
    dispatcher: &'a Dispatcher<T, V, A, R, N>,
    instance: &'a T,
}

impl<'a, T, V, A, R, N> Bound<'a, T, V, A, R, N>
where
    V: Send + Sync + 'static,
    N: PartialOrd + 'static,
{
    pub(crate) fn new(dispatcher: &'a Dispatcher<T, V, A, R, N>, instance: &'a T) -> Self {
        Self {
            dispatcher,
            instance,
        }
    }

    /// Dispatch with the bound instance prepended to `args`.
    pub fn call(&self, args: A) -> R {
        self.dispatcher.dispatch(self.instance, args)
    }

    /// Raw selection value for the bound instance.
    pub fn resolve(&self) -> V {
        self.dispatcher.resolve(self.instance)
    }
}

impl<'a, T, V, A, R, N> Bound<'a, T, V, A, R, N> {
    pub fn instance(&self) -> &'a T {
        self.instance
    }

    pub fn dispatcher(&self) -> &'a Dispatcher<T, V, A, R, N> {
        self.dispatcher
    }

    pub fn name(&self) -> &'a str {
        self.dispatcher.name()
    }

    pub fn signature(&self) -> &'a Signature {
        self.dispatcher.signature()
    }
}

impl<T, V, A, R, N> Clone for Bound<'_, T, V, A, R, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V, A, R, N> Copy for Bound<'_, T, V, A, R, N> {}

impl<T, V, A, R, N> fmt::Debug for Bound<'_, T, V, A, R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bound")
            .field("dispatcher", &self.dispatcher.signature())
            .finish_non_exhaustive()
    }
}
