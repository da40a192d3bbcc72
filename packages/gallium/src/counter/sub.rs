use crate::{Color, Counter, Error, Result};

/// Handle of a subcounter, returned by [`Counter::add_subcounter`].
///
/// The handle only works with the counter that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubCounterId {
    owner: usize,
    index: usize,
}

impl SubCounterId {
    /// The 1-based number of the subcounter, used in field names like `count_1`
    #[inline(always)]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Where [`Counter::update_sub_from`] moves the count from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The unallocated part of the parent counter
    Parent,
    /// Another subcounter of the same parent
    Sub(SubCounterId),
}

impl From<SubCounterId> for Source {
    fn from(value: SubCounterId) -> Self {
        Self::Sub(value)
    }
}

/// A portion of the count of a [`Counter`], drawn as its own segment in the bar
#[derive(Debug, Clone, PartialEq)]
pub struct SubCounter {
    count: i64,
    start_count: i64,
    color: Option<Color>,
    /// Populate `rate_n`, `interval_n` and `eta_n`
    all_fields: bool,
}

impl SubCounter {
    #[inline(always)]
    pub fn count(&self) -> i64 {
        self.count
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }

    pub fn all_fields(&self) -> bool {
        self.all_fields
    }

    /// Absolute change of count since the subcounter was created
    pub(crate) fn iterations(&self) -> f64 {
        (self.count - self.start_count).unsigned_abs() as f64
    }
}

impl Counter {
    /// Sum of the counts of all subcounters
    pub fn subcount(&self) -> i64 {
        self.subcounters.iter().map(SubCounter::count).sum()
    }

    /// Get the subcounter
    pub fn subcounter(&self, id: SubCounterId) -> Option<&SubCounter> {
        if id.owner != self.id {
            return None;
        }
        self.subcounters.get(id.index)
    }

    /// All subcounters in creation order
    pub fn subcounters(&self) -> &[SubCounter] {
        &self.subcounters
    }

    /// Add a subcounter for a multicolored bar.
    ///
    /// The initial `count` is allocated from the unallocated part of this counter,
    /// so it fails if that is not enough. `all_fields` enables the `rate_n`, `interval_n`
    /// and `eta_n` fields for the subcounter.
    ///
    /// ```rust
    /// # use pistonite_ga as ga;
    /// # let manager = ga::StreamManager::new(ga::AnsiTerminal::new(false, Default::default()), std::io::sink()).into_arc();
    /// let mut counter = ga::counter("Tests").total(100).spawn(manager)?;
    /// counter.update(10)?;
    /// let passed = counter.add_subcounter(Some("green".into()), 6, false)?;
    /// let failed = counter.add_subcounter(Some("red".into()), 0, false)?;
    /// counter.update_sub(failed, 2, false)?;
    /// assert_eq!(counter.count(), 12);
    /// assert_eq!(counter.subcount(), 8);
    /// assert!(counter.add_subcounter(None, 5, false).is_err());
    /// # let _ = passed;
    /// # Ok::<(), ga::Error>(())
    /// ```
    pub fn add_subcounter(
        &mut self,
        color: Option<Color>,
        count: i64,
        all_fields: bool,
    ) -> Result<SubCounterId> {
        ensure_state!(count >= 0, "invalid count: {count}");
        let unallocated = self.count - self.subcount();
        ensure_state!(
            unallocated - count >= 0,
            "invalid count: {count}, only {unallocated} is unallocated"
        );
        if let Some(color) = &color {
            color.validate()?;
        }
        let id = SubCounterId {
            owner: self.id,
            index: self.subcounters.len(),
        };
        self.subcounters.push(SubCounter {
            count,
            start_count: count,
            color,
            all_fields,
        });
        log::debug!("counter {}: added subcounter {}", self.id, id.number());
        Ok(id)
    }

    /// Increment the subcounter. The parent count is incremented by the same amount,
    /// then refreshed if needed.
    pub fn update_sub(&mut self, id: SubCounterId, incr: i64, force: bool) -> Result<()> {
        let index = self.sub_index(id)?;
        let sub_count = self.subcounters[index].count;
        ensure_state!(
            sub_count.checked_add(incr).is_some_and(|x| x >= 0),
            "invalid increment: {incr}, subcounter count is {sub_count}"
        );
        let count = self.checked_count(incr)?;
        self.subcounters[index].count += incr;
        self.count = count;
        self.maybe_refresh(force)
    }

    /// Move `incr` from the source to the subcounter. The parent count does not change.
    ///
    /// Fails if the source is a subcounter of another counter, or if any count
    /// would become negative (including the unallocated part of the parent).
    pub fn update_sub_from(
        &mut self,
        id: SubCounterId,
        source: impl Into<Source>,
        incr: i64,
        force: bool,
    ) -> Result<()> {
        let index = self.sub_index(id)?;
        let source_index = match source.into() {
            Source::Parent => None,
            Source::Sub(source) => match self.sub_index(source) {
                Ok(x) => Some(x),
                Err(_) => {
                    return Err(Error::InvalidState(
                        "source must be parent or peer".to_string(),
                    ));
                }
            },
        };
        let sub_count = self.subcounters[index].count;
        let source_count = match source_index {
            Some(i) => self.subcounters[i].count,
            None => self.count,
        };
        ensure_state!(
            sub_count.checked_add(incr).is_some_and(|x| x >= 0)
                && source_count.checked_sub(incr).is_some_and(|x| x >= 0),
            "invalid increment: {incr}"
        );
        if source_index.is_none() {
            let unallocated = self.count - self.subcount();
            ensure_state!(
                unallocated - incr >= 0,
                "invalid increment: {incr}, only {unallocated} is unallocated"
            );
        }
        if let Some(i) = source_index {
            self.subcounters[i].count -= incr;
        }
        self.subcounters[index].count += incr;
        log::trace!(
            "counter {}: moved {incr} to subcounter {}",
            self.id,
            id.number()
        );
        self.maybe_refresh(force)
    }

    fn sub_index(&self, id: SubCounterId) -> Result<usize> {
        ensure_state!(
            id.owner == self.id && id.index < self.subcounters.len(),
            "subcounter {} does not belong to this counter",
            id.number()
        );
        Ok(id.index)
    }
}
