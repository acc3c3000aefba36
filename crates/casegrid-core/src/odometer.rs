//! Mixed-radix counter driving enumeration order.
//!
//! Position `i` counts over `0..radices[i]`. The first position varies
//! slowest and the last fastest, so combinations come out in
//! lexicographic order of their index vectors.
//!
//! Each [`Odometer::step`] writes only the positions from the cursor to the
//! end. Positions to the left of the cursor did not change since the
//! previous step and are not rewritten, which keeps a step amortized O(1)
//! in the number of writes.

/// Counter state. `index[0] == radices[0]` marks exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Odometer {
    radices: Vec<usize>,
    index: Vec<usize>,
    /// Indices written for the most recent combination.
    current: Vec<usize>,
    cursor: usize,
}

impl Odometer {
    pub fn new(radices: Vec<usize>) -> Self {
        let n = radices.len();
        let mut odometer = Self {
            radices,
            index: vec![0; n],
            current: vec![0; n],
            cursor: 0,
        };
        odometer.mark_empty_product();
        odometer
    }

    /// A zero radix anywhere makes the product empty.
    fn mark_empty_product(&mut self) {
        if self.radices.contains(&0) {
            self.index[0] = self.radices[0];
        }
    }

    pub fn len(&self) -> usize {
        self.radices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radices.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.radices.is_empty() || self.index[0] >= self.radices[0]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Indices of the combination produced by the last successful step.
    pub fn current(&self) -> &[usize] {
        &self.current
    }

    pub fn radices(&self) -> &[usize] {
        &self.radices
    }

    /// Back to the first combination. The next step rewrites every position.
    pub fn reset(&mut self) {
        self.index.iter_mut().for_each(|i| *i = 0);
        self.current.iter_mut().for_each(|i| *i = 0);
        self.cursor = 0;
        self.mark_empty_product();
    }

    /// Advance to the next combination.
    ///
    /// `write(position, index)` is called for every position whose value
    /// changed, from the cursor to the last position. Returns `Ok(false)`
    /// once the counter is exhausted; an error from `write` aborts the step.
    pub fn step<E>(
        &mut self,
        mut write: impl FnMut(usize, usize) -> Result<(), E>,
    ) -> Result<bool, E> {
        if self.is_exhausted() {
            return Ok(false);
        }

        let last = self.radices.len() - 1;
        let mut ready = false;
        while !ready {
            let pos = self.cursor;
            write(pos, self.index[pos])?;
            self.current[pos] = self.index[pos];

            if pos < last {
                self.cursor += 1;
            } else {
                ready = true;
                self.index[pos] += 1;
            }

            // Carry leftward, leaving the cursor on the position that changed.
            while self.index[self.cursor] == self.radices[self.cursor] && self.cursor > 0 {
                self.index[self.cursor] = 0;
                self.cursor -= 1;
                self.index[self.cursor] += 1;
            }
        }

        tracing::trace!(cursor = self.cursor, current = ?self.current, "odometer step");
        Ok(true)
    }
}
