//! ConcurrencyGuard: If-Match / ETag protection for a resource endpoint
//!
//! The guard composes three injected pieces:
//! - a [`FingerprintProvider`] computing the current validator
//! - a read [`Handler`]
//! - a write [`Handler`]
//!
//! and exposes its own `read` and `write` entry points.
//!
//! ## Write Sequence
//!
//! ```text
//! 1. No match token?            -> PreconditionRequired, handler not called
//! 2. compute current fingerprint (provider)
//! 3. token != current?          -> PreconditionFailed, handler not called
//! 4. call write handler
//! 5. compute fingerprint again  (after the handler has returned)
//! 6. return body + new fingerprint
//! ```
//!
//! Steps 2-4 are not atomic against other writers. A store with a
//! compare-and-swap should be asked to repeat the comparison inside the write
//! handler; see `ResourceStore::compare_and_swap`.
//!
//! ## Errors
//!
//! Handler and provider errors come back unchanged: the guard returns the
//! write handler's own error type, and rejections enter it through
//! `From<Rejection>`.

use crate::precondition::{check_token, ConditionalRequest};
use occgate_core::{Fingerprint, FingerprintProvider, Rejection};
use tracing::debug;

/// An operation on the guarded resource
///
/// Any `Fn(&C) -> Result<T, E>` is a handler.
pub trait Handler<C: ?Sized> {
    /// Response body produced on success
    type Output;
    /// Handler's own error type
    type Error;

    /// Run the operation
    fn call(&self, ctx: &C) -> Result<Self::Output, Self::Error>;
}

impl<C, F, T, E> Handler<C> for F
where
    C: ?Sized,
    F: Fn(&C) -> Result<T, E>,
{
    type Output = T;
    type Error = E;

    fn call(&self, ctx: &C) -> Result<T, E> {
        self(ctx)
    }
}

/// A response body together with the validator of the state it reflects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tagged<T> {
    /// Handler output
    pub body: T,
    /// Fingerprint of the resource after the operation
    pub etag: Fingerprint,
}

/// Optimistic concurrency guard around a read and a write handler
///
/// Stateless between calls; one guard can serve concurrent requests if its
/// parts are `Sync`.
///
/// # Example
///
/// ```
/// use occgate_concurrency::{Conditional, ConcurrencyGuard};
/// use occgate_core::{Fingerprint, Rejection};
/// use std::cell::RefCell;
///
/// let text = RefCell::new(String::from("hello"));
/// let guard = ConcurrencyGuard::new(
///     |_: &Conditional<&str>| -> Result<Fingerprint, Rejection> {
///         Ok(Fingerprint::of(text.borrow().as_bytes()))
///     },
///     |_: &Conditional<&str>| -> Result<String, Rejection> { Ok(text.borrow().clone()) },
///     |ctx: &Conditional<&str>| -> Result<String, Rejection> {
///         *text.borrow_mut() = ctx.inner.to_string();
///         Ok(text.borrow().clone())
///     },
/// );
///
/// let f1 = guard.read(&Conditional::unconditional("")).unwrap().etag;
/// let written = guard
///     .write(&Conditional::expecting(f1.as_str(), "world"))
///     .unwrap();
/// assert_eq!(written.body, "world");
/// assert_eq!(written.etag, Fingerprint::of(b"world"));
/// ```
pub struct ConcurrencyGuard<P, R, W> {
    provider: P,
    read: R,
    write: W,
}

impl<P, R, W> ConcurrencyGuard<P, R, W> {
    /// Compose a guard
    pub fn new(provider: P, read: R, write: W) -> Self {
        Self {
            provider,
            read,
            write,
        }
    }

    /// Guarded read
    ///
    /// Delegates unconditionally, then attaches the current fingerprint.
    ///
    /// # Errors
    ///
    /// Whatever the read handler or the provider return.
    pub fn read<C>(&self, ctx: &C) -> Result<Tagged<R::Output>, R::Error>
    where
        C: ?Sized,
        P: FingerprintProvider<C>,
        R: Handler<C>,
        R::Error: From<P::Error>,
    {
        let body = self.read.call(ctx)?;
        let etag = self.provider.compute(ctx)?;
        Ok(Tagged { body, etag })
    }

    /// Guarded conditional write
    ///
    /// # Errors
    ///
    /// - `Rejection::PreconditionRequired` if `ctx` carries no match token
    /// - `Rejection::PreconditionFailed` if the token is stale
    /// - whatever the write handler or the provider return
    ///
    /// On either rejection the write handler has not been called.
    ///
    /// A provider error after the handler returned does not undo the write:
    /// the write is applied and the caller sees the provider's error. A
    /// provider that fingerprints what the handler produced, rather than
    /// re-reading the resource, cannot fail at that point.
    pub fn write<C>(&self, ctx: &C) -> Result<Tagged<W::Output>, W::Error>
    where
        C: ConditionalRequest + ?Sized,
        P: FingerprintProvider<C>,
        W: Handler<C>,
        W::Error: From<P::Error> + From<Rejection>,
    {
        let token = match ctx.precondition().token() {
            Ok(token) => token,
            Err(rejection) => {
                debug!(target: "occgate::guard", "write rejected: no If-Match");
                return Err(rejection.into());
            }
        };

        let current = self.provider.compute(ctx)?;
        if let Err(rejection) = check_token(token, &current) {
            debug!(
                target: "occgate::guard",
                provided = token,
                current = %current,
                "write rejected: stale If-Match"
            );
            return Err(rejection.into());
        }

        let body = self.write.call(ctx)?;
        let etag = self.provider.compute(ctx)?;
        debug!(
            target: "occgate::guard",
            before = %current,
            after = %etag,
            "conditional write applied"
        );
        Ok(Tagged { body, etag })
    }
}
