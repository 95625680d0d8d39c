/// A change to a persisted value: either a replacement or an updater that
/// derives the next value from the latest one.
pub enum Update<V> {
    Replace(V),
    Apply(Box<dyn FnOnce(&V) -> V + Send>),
}

impl<V> Update<V> {
    pub fn apply<F>(f: F) -> Self
    where
        F: FnOnce(&V) -> V + Send + 'static,
    {
        Self::Apply(Box::new(f))
    }

    /// Produce the next value from `current`.
    pub fn run(self, current: &V) -> V {
        match self {
            Self::Replace(value) => value,
            Self::Apply(f) => f(current),
        }
    }
}

impl<V> From<V> for Update<V> {
    fn from(value: V) -> Self {
        Self::Replace(value)
    }
}
