//! Non-empty vector type for collections that cannot be empty.
//!
//! This module provides `NonEmptyVec<T>`, a vector guaranteed to contain at
//! least one element. An exhausted retry always carries at least the first
//! attempt's failure, so the error trail in
//! [`RetryExhausted`](crate::RetryExhausted) uses this type to make that
//! guarantee structural instead of a runtime assertion.
//!
//! # Examples
//!
//! ```
//! use steadfast::NonEmptyVec;
//!
//! let trail = NonEmptyVec::new("timeout", vec!["timeout", "refused"]);
//! assert_eq!(trail.head(), &"timeout");
//! assert_eq!(trail.last(), &"refused");
//! assert_eq!(trail.len(), 3);
//! ```

/// A vector guaranteed to contain at least one element.
///
/// Accessors that would return `Option` on a plain `Vec`, like `head()`
/// and `last()`, always succeed here.
///
/// # Example
///
/// ```
/// use steadfast::NonEmptyVec;
///
/// let trail = NonEmptyVec::singleton("connection reset");
/// assert_eq!(trail.head(), &"connection reset");
/// assert_eq!(trail.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyVec<T> {
    head: T,
    tail: Vec<T>,
}

impl<T> NonEmptyVec<T> {
    /// Create a new non-empty vector with a head element and tail.
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::new(1, vec![2, 3]);
    /// assert_eq!(nev.len(), 3);
    /// ```
    pub fn new(head: T, tail: Vec<T>) -> Self {
        Self { head, tail }
    }

    /// Create a non-empty vector from a single element.
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::singleton(42);
    /// assert_eq!(nev.len(), 1);
    /// assert_eq!(nev.head(), &42);
    /// ```
    pub fn singleton(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    /// Try to create a non-empty vector from a `Vec`.
    ///
    /// Returns `None` if the vector is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::from_vec(vec![1, 2, 3]).unwrap();
    /// assert_eq!(nev.len(), 3);
    ///
    /// let empty = NonEmptyVec::from_vec(Vec::<i32>::new());
    /// assert!(empty.is_none());
    /// ```
    pub fn from_vec(mut vec: Vec<T>) -> Option<Self> {
        if vec.is_empty() {
            None
        } else {
            let head = vec.remove(0);
            Some(Self::new(head, vec))
        }
    }

    /// Get the first element (always succeeds).
    pub fn head(&self) -> &T {
        &self.head
    }

    /// Get the tail (all elements except the first).
    pub fn tail(&self) -> &[T] {
        &self.tail
    }

    /// Get the last element (always succeeds).
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::new(1, vec![2, 3]);
    /// assert_eq!(nev.last(), &3);
    ///
    /// let single = NonEmptyVec::singleton(42);
    /// assert_eq!(single.last(), &42);
    /// ```
    pub fn last(&self) -> &T {
        self.tail.last().unwrap_or(&self.head)
    }

    /// Get the number of elements.
    ///
    /// Always >= 1.
    pub fn len(&self) -> usize {
        1 + self.tail.len()
    }

    /// Check if the vector is empty.
    ///
    /// Always returns `false` since a NonEmptyVec is guaranteed to have at
    /// least one element.
    ///
    /// This method exists to satisfy clippy's `len_without_is_empty` lint.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Push an element to the end.
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let mut trail = NonEmptyVec::singleton("first failure");
    /// trail.push("second failure");
    /// assert_eq!(trail.len(), 2);
    /// ```
    pub fn push(&mut self, value: T) {
        self.tail.push(value);
    }

    /// Convert to a regular `Vec`.
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::new(1, vec![2, 3]);
    /// assert_eq!(nev.into_vec(), vec![1, 2, 3]);
    /// ```
    pub fn into_vec(self) -> Vec<T> {
        let mut vec = vec![self.head];
        vec.extend(self.tail);
        vec
    }

    /// Iterate over all elements, oldest first.
    ///
    /// # Example
    ///
    /// ```
    /// use steadfast::NonEmptyVec;
    ///
    /// let nev = NonEmptyVec::new(1, vec![2, 3]);
    /// let sum: i32 = nev.iter().sum();
    /// assert_eq!(sum, 6);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        std::iter::once(&self.head).chain(self.tail.iter())
    }
}

// IntoIterator
impl<T> IntoIterator for NonEmptyVec<T> {
    type Item = T;
    type IntoIter = std::iter::Chain<std::iter::Once<T>, std::vec::IntoIter<T>>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self.head).chain(self.tail)
    }
}

// Index
impl<T> std::ops::Index<usize> for NonEmptyVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        if index == 0 {
            &self.head
        } else {
            &self.tail[index - 1]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton() {
        let nev = NonEmptyVec::singleton(42);
        assert_eq!(nev.head(), &42);
        assert_eq!(nev.tail(), &[] as &[i32]);
        assert_eq!(nev.len(), 1);
    }

    #[test]
    fn test_new() {
        let nev = NonEmptyVec::new(1, vec![2, 3]);
        assert_eq!(nev.head(), &1);
        assert_eq!(nev.tail(), &[2, 3]);
        assert_eq!(nev.len(), 3);
    }

    #[test]
    fn test_from_vec() {
        let nev = NonEmptyVec::from_vec(vec![1, 2, 3]).unwrap();
        assert_eq!(nev.head(), &1);
        assert_eq!(nev.tail(), &[2, 3]);

        let empty = NonEmptyVec::from_vec(Vec::<i32>::new());
        assert!(empty.is_none());
    }

    #[test]
    fn test_last() {
        let nev = NonEmptyVec::new(1, vec![2, 3]);
        assert_eq!(nev.last(), &3);

        let single = NonEmptyVec::singleton(42);
        assert_eq!(single.last(), &42);
    }

    #[test]
    fn test_push_keeps_order() {
        let mut nev = NonEmptyVec::singleton(1);
        nev.push(2);
        nev.push(3);
        assert_eq!(nev.len(), 3);
        assert_eq!(nev.into_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_never_empty() {
        let nev = NonEmptyVec::singleton("only");
        assert!(!nev.is_empty());
    }

    #[test]
    fn test_iter() {
        let nev = NonEmptyVec::new(1, vec![2, 3]);
        let collected: Vec<_> = nev.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn test_into_iter() {
        let nev = NonEmptyVec::new(1, vec![2, 3]);
        let vec: Vec<_> = nev.into_iter().collect();
        assert_eq!(vec, vec![1, 2, 3]);
    }

    #[test]
    fn test_index() {
        let nev = NonEmptyVec::new(1, vec![2, 3]);
        assert_eq!(nev[0], 1);
        assert_eq!(nev[1], 2);
        assert_eq!(nev[2], 3);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_bounds() {
        let nev = NonEmptyVec::singleton(42);
        let _ = nev[1];
    }
}
