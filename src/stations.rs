/// Source of the station count that fixes the station axis of every grid.
///
/// The full station table (identifiers, coordinates, route mapping) lives
/// outside this crate; grids only need to know how many stations each time
/// block holds.
pub trait StationTable {
    fn station_count(&self) -> usize;
}

/// A station table known only by its size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationCount(pub usize);

impl StationTable for StationCount {
    fn station_count(&self) -> usize {
        self.0
    }
}
