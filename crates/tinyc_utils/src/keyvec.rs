use std::fmt;
use std::marker::PhantomData;

/// A vector indexed by a typed key instead of a bare `usize`.
pub struct KeyVec<K, V> {
    inner: Vec<V>,
    _phantom: PhantomData<*const K>,
}

impl<K: Key, V> KeyVec<K, V> {
    #[must_use]
    pub fn insert(&mut self, value: V) -> K {
        let key = K::from_usize(self.inner.len());
        self.inner.push(value);
        key
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.inner.get(key.as_usize())
    }
}

impl<K, V> Default for KeyVec<K, V> {
    fn default() -> Self {
        Self {
            inner: vec![],
            _phantom: PhantomData,
        }
    }
}

impl<K: Key + fmt::Debug, V: fmt::Debug> fmt::Debug for KeyVec<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(
                self.inner
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (K::from_usize(i), v)),
            )
            .finish()
    }
}

pub trait Key: Copy {
    fn from_usize(n: usize) -> Self;
    fn as_usize(&self) -> usize;
}

#[macro_export]
macro_rules! declare_key_type {
(
    $(#[$attr:meta])*
    $v:vis struct $i:ident;
) => {
    $(#[$attr])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    $v struct $i(pub usize);

    impl $crate::keyvec::Key for $i {
        fn from_usize(n: usize) -> Self {
            Self(n)
        }

        fn as_usize(&self) -> usize {
            self.0
        }
    }
};
}
