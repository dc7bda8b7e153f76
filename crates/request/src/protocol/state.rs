use std::fmt;

/// Progress of a single request through the parser.
///
/// The variants are ordered: a parser only ever moves from a variant to a later one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum ParseState {
    /// Nothing parsed yet, waiting for the request line
    #[default]
    Init,
    /// Request line stored, waiting for the header block
    RequestLineParsed,
    /// Headers stored, collecting the body
    HeadersParsed,
    /// The whole request has been parsed
    Done,
}

impl ParseState {
    #[inline]
    pub fn is_done(self) -> bool {
        matches!(self, ParseState::Done)
    }
}

impl fmt::Display for ParseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseState::Init => "init",
            ParseState::RequestLineParsed => "request line parsed",
            ParseState::HeadersParsed => "headers parsed",
            ParseState::Done => "done",
        };
        f.write_str(name)
    }
}
