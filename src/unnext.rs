use log::trace;
use std::collections::VecDeque;

/// Iterator wrapper that allows pushing items back with [`unnext`](Self::unnext).
///
/// Pushed-back items are yielded before anything else is taken from the
/// wrapped iterator, the most recently pushed one first.
///
/// The wrapper *is* the iterator, so items pushed back inside a loop over it
/// are seen right away, including by nested loops over `by_ref()`:
///
/// ```
/// use unread::UnnextIter;
///
/// let mut items = UnnextIter::new([11, 12, 13]);
/// let mut results = vec![];
/// while let Some(item) = items.next() {
///     results.push(item);
///     if results.len() == 2 {
///         items.unnext(item);
///         items.unnext(77);
///     }
/// }
/// assert_eq!(results, [11, 12, 77, 12, 13]);
/// ```
#[derive(Debug, Clone)]
pub struct UnnextIter<I: Iterator> {
    inner: I,
    // front is delivered first
    pending: VecDeque<I::Item>,
    // taken from `inner` by peek(), delivered after `pending`
    peeked: Option<I::Item>,
}

impl<I: Iterator> UnnextIter<I> {
    pub fn new<T>(iterable: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        UnnextIter {
            inner: iterable.into_iter(),
            pending: VecDeque::new(),
            peeked: None,
        }
    }

    /// Push `item` back so that it is the next one yielded.
    pub fn unnext(&mut self, item: I::Item) {
        self.pending.push_front(item);
        trace!("unnext: {} item(s) pending", self.pending.len());
    }

    /// The next item, without consuming it.
    ///
    /// An item peeked from the wrapped iterator doesn't count as pushed back.
    pub fn peek(&mut self) -> Option<&I::Item> {
        if let Some(item) = self.pending.front() {
            return Some(item);
        }
        if self.peeked.is_none() {
            self.peeked = self.inner.next();
        }
        self.peeked.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Pushed-back items, in the order they will be yielded.
    pub fn pending(&self) -> impl Iterator<Item = &I::Item> + '_ {
        self.pending.iter()
    }

    /// Unwrap the iterator, discarding pending and peeked items.
    pub fn into_inner(self) -> I {
        self.inner
    }
}

impl<I: Iterator> Iterator for UnnextIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(item) = self.pending.pop_front() {
            return Some(item);
        }
        match self.peeked.take() {
            Some(item) => Some(item),
            None => self.inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.inner.size_hint();
        let n = self.pending.len() + usize::from(self.peeked.is_some());
        (
            lower.saturating_add(n),
            upper.and_then(|upper| upper.checked_add(n)),
        )
    }
}

impl<I: Iterator> From<I> for UnnextIter<I> {
    fn from(inner: I) -> Self {
        UnnextIter::new(inner)
    }
}

/// Adds [`unnextable`](Unnextable::unnextable) to all iterators.
pub trait Unnextable: Iterator + Sized {
    fn unnextable(self) -> UnnextIter<Self> {
        UnnextIter::new(self)
    }
}

impl<I: Iterator> Unnextable for I {}
