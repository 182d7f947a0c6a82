use std::fmt::Debug;
use std::future::Future;

/// Extra combinators for `Result` (`Err` is the failure arm).
///
/// `map` and `and_then` (the synchronous chain) come from std. The async
/// variants keep the same short-circuit rule across `.await` points: once a
/// failure is present the producer is never polled.
pub trait ResultExt<T, E>: Sized {
    /// Collapse both arms into one value.
    fn fold<R>(self, on_failure: impl FnOnce(E) -> R, on_success: impl FnOnce(T) -> R) -> R;

    /// Await `f` on success, pass a failure through untouched.
    ///
    /// Collaborator faults raised inside `f` surface as `Err` values; use-case
    /// errors implement `From` for store and scraper errors so `?` inside the
    /// producer maps them into the failure arm.
    fn async_chain<U, F, Fut>(self, f: F) -> impl Future<Output = Result<U, E>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<U, E>>;

    /// Await an infallible `f` on success.
    fn async_map<U, F, Fut>(self, f: F) -> impl Future<Output = Result<U, E>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>;

    /// Take the success value of a result that cannot fail by construction.
    ///
    /// # Panics
    /// Panics on the failure arm.
    fn must_succeed(self, what: &str) -> T
    where
        E: Debug;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn fold<R>(self, on_failure: impl FnOnce(E) -> R, on_success: impl FnOnce(T) -> R) -> R {
        match self {
            Ok(value) => on_success(value),
            Err(error) => on_failure(error),
        }
    }

    fn async_chain<U, F, Fut>(self, f: F) -> impl Future<Output = Result<U, E>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Result<U, E>>,
    {
        async move {
            match self {
                Ok(value) => f(value).await,
                Err(error) => Err(error),
            }
        }
    }

    fn async_map<U, F, Fut>(self, f: F) -> impl Future<Output = Result<U, E>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        async move {
            match self {
                Ok(value) => Ok(f(value).await),
                Err(error) => Err(error),
            }
        }
    }

    #[track_caller]
    fn must_succeed(self, what: &str) -> T
    where
        E: Debug,
    {
        match self {
            Ok(value) => value,
            Err(error) => panic!("invariant violated: {what} failed with {error:?}"),
        }
    }
}

/// Extract whichever arm is present when both arms carry the same type.
pub trait Join<T> {
    fn join(self) -> T;
}

impl<T> Join<T> for Result<T, T> {
    fn join(self) -> T {
        match self {
            Ok(value) | Err(value) => value,
        }
    }
}
