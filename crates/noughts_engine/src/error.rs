//! Engine errors.

/// Input the engine refuses outright.
///
/// Occupied squares and moves after the game has ended are not errors;
/// they come back as an outcome with nothing placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum EngineError {
    /// Cell index outside 0-8.
    #[display("Cell index {} is out of range (must be 0-8)", _0)]
    CellOutOfRange(usize),
}

impl std::error::Error for EngineError {}
