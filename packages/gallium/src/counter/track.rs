use crate::Counter;

/// Iterator adapter that counts the items. See [`Counter::track`]
#[derive(Debug)]
pub struct Track<'a, I> {
    counter: &'a mut Counter,
    iter: I,
    /// An item was yielded and not counted yet
    pending: bool,
}

impl Counter {
    /// Count the items of the iterator.
    ///
    /// An item is counted when the next one is requested, so the count
    /// reflects items that are done. If the counter has no total and the
    /// iterator knows its exact length, the total is set to cover it.
    ///
    /// Update errors do not stop the iteration, they are logged as warnings.
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// # let manager = ga::StreamManager::new(ga::AnsiTerminal::new(false, Default::default()), std::io::sink()).into_arc();
    /// let mut counter = ga::counter("Copying").unit("files").spawn(manager)?;
    /// let mut copied = 0;
    /// for _file in counter.track(["a.txt", "b.txt", "c.txt"]) {
    ///     copied += 1;
    /// }
    /// assert_eq!(counter.count(), copied);
    /// assert_eq!(counter.total(), Some(3));
    /// # Ok::<(), ga::Error>(())
    /// ```
    pub fn track<I: IntoIterator>(&mut self, iter: I) -> Track<'_, I::IntoIter> {
        let iter = iter.into_iter();
        if self.total.is_none() {
            if let (lower, Some(upper)) = iter.size_hint() {
                if lower == upper {
                    let len = i64::try_from(lower).unwrap_or(i64::MAX);
                    self.total = Some(self.count.saturating_add(len));
                }
            }
        }
        Track {
            counter: self,
            iter,
            pending: false,
        }
    }
}

impl<I: Iterator> Iterator for Track<'_, I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending {
            if let Err(e) = self.counter.update(1) {
                log::warn!("failed to update counter: {e}");
            }
        }
        let item = self.iter.next();
        self.pending = item.is_some();
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}
