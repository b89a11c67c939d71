use std::fmt;

/// Broad classification of a [`CursorError`].
///
/// All three kinds indicate misuse of the cursor API by the caller. Traversal
/// outcomes such as "not found" are never reported through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorErrorKind {
    /// Malformed arguments given to explicit cursor construction
    Construction,
    /// Two cursors with different path separators were appended
    IncompatibleSeparator,
    /// A peek/advance/retreat went outside `[0, len]`
    Navigation,
}

/// Path cursor error
///
/// Returned by [`PathCursor::from_parts`](super::PathCursor::from_parts),
/// [`PathCursor::append`](super::PathCursor::append) and the navigation
/// methods when they are called out of bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// A segment was the empty string
    EmptySegment {
        /// Index of the offending segment
        index: usize,
    },
    /// A segment contained the path separator it is supposed to be split on
    SegmentContainsSeparator {
        /// Index of the offending segment
        index: usize,
        /// The segment itself
        segment: String,
    },
    /// More than one segment was given while no path separator is configured
    MultipleSegmentsWithoutSeparator {
        /// Number of segments given
        count: usize,
    },
    /// An extension was given while no extension separator is configured
    ExtensionWithoutSeparator {
        /// The extension that could not be attached
        extension: String,
    },
    /// `append` was called across cursors using different path separators
    IncompatibleSeparator {
        /// Separator of the receiving cursor
        left: Option<String>,
        /// Separator of the appended cursor
        right: Option<String>,
    },
    /// `peek_next`/`advance` called while `has_next()` is false
    NoNext {
        /// Cursor position at the time of the call
        position: usize,
        /// Segment count of the cursor
        len: usize,
    },
    /// `peek_previous`/`retreat` called while `has_previous()` is false
    NoPrevious,
}

impl CursorError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> CursorErrorKind {
        match self {
            CursorError::EmptySegment { .. }
            | CursorError::SegmentContainsSeparator { .. }
            | CursorError::MultipleSegmentsWithoutSeparator { .. }
            | CursorError::ExtensionWithoutSeparator { .. } => CursorErrorKind::Construction,
            CursorError::IncompatibleSeparator { .. } => CursorErrorKind::IncompatibleSeparator,
            CursorError::NoNext { .. } | CursorError::NoPrevious => CursorErrorKind::Navigation,
        }
    }
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::EmptySegment { index } => {
                write!(f, "Path cursor construction error: segment {index} is empty")
            }
            CursorError::SegmentContainsSeparator { index, segment } => {
                write!(
                    f,
                    "Path cursor construction error: segment {index} ('{segment}') \
                    contains the path separator"
                )
            }
            CursorError::MultipleSegmentsWithoutSeparator { count } => {
                write!(
                    f,
                    "Path cursor construction error: {count} segments given but no path \
                    separator is configured (at most 1 allowed)"
                )
            }
            CursorError::ExtensionWithoutSeparator { extension } => {
                write!(
                    f,
                    "Path cursor construction error: extension '{extension}' given but no \
                    extension separator is configured"
                )
            }
            CursorError::IncompatibleSeparator { left, right } => {
                write!(
                    f,
                    "Cannot append path using separator {:?} to path using separator {:?}",
                    right, left
                )
            }
            CursorError::NoNext { position, len } => {
                write!(
                    f,
                    "No next path segment: position {position} is at the end of {len} segments"
                )
            }
            CursorError::NoPrevious => {
                write!(f, "No previous path segment: cursor is at the beginning")
            }
        }
    }
}

impl std::error::Error for CursorError {}
