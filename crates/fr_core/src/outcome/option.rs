/// Branch-style consumption of `Option`.
pub trait OptionExt<T> {
    /// Collapse both arms into one value.
    fn fold<R>(self, on_none: impl FnOnce() -> R, on_some: impl FnOnce(T) -> R) -> R;

    /// Take a value that an invariant guarantees is present.
    ///
    /// # Panics
    /// Panics when the value is absent. Business decisions go through
    /// [`OptionExt::fold`] or `match`, never through this accessor.
    fn must_be_present(self, what: &str) -> T;
}

impl<T> OptionExt<T> for Option<T> {
    fn fold<R>(self, on_none: impl FnOnce() -> R, on_some: impl FnOnce(T) -> R) -> R {
        match self {
            Some(value) => on_some(value),
            None => on_none(),
        }
    }

    #[track_caller]
    fn must_be_present(self, what: &str) -> T {
        match self {
            Some(value) => value,
            None => panic!("invariant violated: {what} must be present"),
        }
    }
}
