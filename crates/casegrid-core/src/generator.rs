use crate::config::GeneratorConfig;
use crate::error::{ConfigError, GenError};
use crate::odometer::Odometer;
use crate::sink::{FailureSink, PanicSink};
use crate::table::{CandidateTable, CaseFields, CaseTable};

/// Enumerates the Cartesian product of a record's candidate fields.
///
/// The generator borrows the record for its whole lifetime and rewrites the
/// registered fields on every successful [`next`](Self::next). Unregistered
/// fields are never touched. Only fields whose candidate changed since the
/// previous combination are rewritten, so a caller that wants to keep a
/// combination must clone the record before advancing again.
pub struct Generator<'r, R, S: FailureSink = PanicSink> {
    record: &'r mut R,
    table: CandidateTable<'r, R>,
    odometer: Odometer,
    sink: S,
    produced: u64,
    poisoned: bool,
}

/// Generator over a record's self-declared fields, failing the current test
/// on any error.
pub fn generate_cases<R: CaseTable>(record: &mut R) -> Generator<'_, R> {
    Generator::new(record, R::case_fields(), PanicSink)
}

impl<'r, R: CaseTable> Generator<'r, R> {
    pub fn for_record(record: &'r mut R) -> Self {
        generate_cases(record)
    }
}

impl<'r, R, S: FailureSink> Generator<'r, R, S> {
    pub fn new(record: &'r mut R, fields: CaseFields<'r, R>, sink: S) -> Self {
        Self::with_config(record, fields, &GeneratorConfig::default(), sink)
    }

    /// Build a generator, reporting construction errors to `sink`.
    ///
    /// If the sink returns instead of aborting, the generator is returned
    /// already failed and yields no combinations.
    pub fn with_config(
        record: &'r mut R,
        fields: CaseFields<'r, R>,
        config: &GeneratorConfig,
        sink: S,
    ) -> Self {
        match CandidateTable::build(fields, config) {
            Ok(table) => Self::from_table(record, table, sink),
            Err(err) => {
                let mut gen = Self::from_table(record, CandidateTable::empty(), sink);
                gen.fail(err.into());
                gen
            }
        }
    }

    /// Build a generator, returning construction errors to the caller.
    pub fn try_new(
        record: &'r mut R,
        fields: CaseFields<'r, R>,
        config: &GeneratorConfig,
        sink: S,
    ) -> Result<Self, ConfigError> {
        let table = CandidateTable::build(fields, config)?;
        Ok(Self::from_table(record, table, sink))
    }

    pub fn from_table(record: &'r mut R, table: CandidateTable<'r, R>, sink: S) -> Self {
        let odometer = Odometer::new(table.candidate_counts());
        Self {
            record,
            table,
            odometer,
            sink,
            produced: 0,
            poisoned: false,
        }
    }

    /// Write the next combination into the record.
    ///
    /// Returns `false` once every combination has been produced, or after a
    /// fatal error has been reported to the sink.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        match self.try_next() {
            Ok(advanced) => advanced,
            Err(err) => {
                self.fail(err);
                false
            }
        }
    }

    /// Like [`next`](Self::next), but returns errors instead of reporting
    /// them to the sink. Errors returned here do not mark the generator
    /// failed.
    pub fn try_next(&mut self) -> Result<bool, GenError> {
        if self.poisoned {
            return Ok(false);
        }

        let table = &self.table;
        let record = &mut *self.record;
        let advanced = self
            .odometer
            .step(|entry, index| table.write(record, entry, index))?;

        if advanced {
            self.produced += 1;
        }
        Ok(advanced)
    }

    fn fail(&mut self, err: GenError) {
        tracing::error!(error = %err, "test case generation failed");
        self.poisoned = true;
        self.sink.fatal(err);
    }

    /// Restart from the first combination. Every field is rewritten on the
    /// next call. A failed generator stays failed.
    pub fn reset(&mut self) {
        tracing::debug!(produced = self.produced, "reset generator");
        self.odometer.reset();
        self.produced = 0;
    }

    pub fn record(&self) -> &R {
        self.record
    }

    pub fn table(&self) -> &CandidateTable<'r, R> {
        &self.table
    }

    pub fn combinations_total(&self) -> u64 {
        self.table.total_combinations()
    }

    /// Number of combinations produced since construction or the last reset.
    pub fn produced(&self) -> u64 {
        self.produced
    }

    /// Candidate index per field for the current combination.
    pub fn indices(&self) -> &[usize] {
        self.odometer.current()
    }

    pub fn is_failed(&self) -> bool {
        self.poisoned
    }

    /// Drain the remaining combinations as owned snapshots.
    pub fn collect_cases(&mut self) -> Vec<R>
    where
        R: Clone,
    {
        let remaining = self.combinations_total().saturating_sub(self.produced);
        let mut cases = Vec::with_capacity(usize::try_from(remaining).unwrap_or(0));
        while self.next() {
            cases.push(self.record.clone());
        }
        cases
    }
}
