/// Controller lifecycle state. Only the worker thread ever holds or
/// transitions one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorState {
    /// Waiting for the first button press.
    Idle,
    /// Deciding where to go next.
    SelectDirection,
    MoveUp,
    MoveDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}
