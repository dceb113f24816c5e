/// Errors reported by [`TourneyTree`](crate::TourneyTree) when arguments fall
/// outside the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The tree has no leaves, so no index or range is valid.
    Empty,
    /// An index or range bound is `>= len`.
    IndexOutOfBounds { index: usize, len: usize },
    /// The left bound of a range is greater than the right bound.
    InvalidRange { left: usize, right: usize },
    /// The sizing policy asks for more slots than can be allocated.
    CapacityOverflow { len: usize },
    /// A slot array too short for `len` leaves, e.g. from a serialized tree.
    StoreTooSmall { slots: usize, required: usize },
}

impl std::fmt::Display for TreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeError::Empty => write!(f, "tree is empty"),
            TreeError::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: the len is {} but the index is {}", len, index)
            }
            TreeError::InvalidRange { left, right } => {
                write!(f, "left index {} is greater than right index {}", left, right)
            }
            TreeError::CapacityOverflow { len } => {
                write!(f, "cannot allocate slots for a tree of {} leaves", len)
            }
            TreeError::StoreTooSmall { slots, required } => {
                write!(f, "store has {} slots but the tree needs {}", slots, required)
            }
        }
    }
}

impl std::error::Error for TreeError {}

pub type Result<T> = std::result::Result<T, TreeError>;
