use crate::domain::setup::SetupInput;
use crate::error::{CalcError, Result};
use std::io::Read;

/// Reads merchant setups from a CSV source.
///
/// Expected header: `name, volume, terminal, stand, terminals, mobile_devices,
/// merchants, compliance`. Every column except `volume` may be left empty or
/// omitted; whitespace around fields is trimmed.
pub struct SetupReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SetupReader<R> {
    /// Creates a new `SetupReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads raw setups, one per row.
    ///
    /// Rows are not normalized here; a bad row yields an error and the
    /// iterator moves on to the next one.
    pub fn setups(self) -> impl Iterator<Item = Result<SetupInput>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CalcError::from))
    }
}
