/// Initial value used when nothing usable is stored.
///
/// A `Supplier` runs at most once, and only when the store has no valid
/// entry for the key.
pub enum Fallback<V> {
    Literal(V),
    Supplier(Box<dyn FnOnce() -> V + Send>),
}

impl<V> Fallback<V> {
    pub fn value(value: V) -> Self {
        Self::Literal(value)
    }

    pub fn with<F>(supplier: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
    {
        Self::Supplier(Box::new(supplier))
    }

    pub fn resolve(self) -> V {
        match self {
            Self::Literal(value) => value,
            Self::Supplier(supplier) => supplier(),
        }
    }
}

impl<V: Default + 'static> Default for Fallback<V> {
    fn default() -> Self {
        Self::Supplier(Box::new(V::default))
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Fallback<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Self::Supplier(_) => f.write_str("Supplier(..)"),
        }
    }
}
