/// Result of scanning a buffer for one syntactic unit.
///
/// Similar in spirit to `httparse::Status`: a scan either produced a unit together with the
/// number of bytes it spans, or the buffer does not hold the whole unit yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan<T> {
    /// The unit was found, `consumed` bytes from the front of the buffer make it up
    Complete { item: T, consumed: usize },
    /// The delimiter has not arrived yet, nothing was consumed
    Incomplete,
}

impl<T> Scan<T> {
    /// Number of bytes the scan consumed, zero when incomplete
    #[inline]
    pub fn consumed(&self) -> usize {
        match self {
            Scan::Complete { consumed, .. } => *consumed,
            Scan::Incomplete => 0,
        }
    }

    /// Converts the scan into its unit, dropping the consumed count
    pub fn into_item(self) -> Option<T> {
        match self {
            Scan::Complete { item, .. } => Some(item),
            Scan::Incomplete => None,
        }
    }
}

/// The section of the request that is still waiting for bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Incomplete {
    StartLine,
    Headers,
    Body,
}

/// Whether a request finished after an [`advance`](crate::codec::RequestParser::advance) call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Progress {
    /// The request is complete
    Done,
    /// More bytes are needed for the given section
    Partial(Incomplete),
}

/// Outcome of one [`advance`](crate::codec::RequestParser::advance) call.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Advance {
    consumed: usize,
    progress: Progress,
}

impl Advance {
    #[inline]
    pub(crate) fn done(consumed: usize) -> Self {
        Self { consumed, progress: Progress::Done }
    }

    #[inline]
    pub(crate) fn partial(consumed: usize, missing: Incomplete) -> Self {
        Self { consumed, progress: Progress::Partial(missing) }
    }

    /// Total bytes consumed from the front of the buffer during the call.
    ///
    /// The caller must discard exactly this many bytes before the next call.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    #[inline]
    pub fn progress(&self) -> Progress {
        self.progress
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        matches!(self.progress, Progress::Done)
    }
}
