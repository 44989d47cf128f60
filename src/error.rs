use thiserror::Error;

/// Errors produced by the top-level entry points.
///
/// Grammar mismatch inside the parser is ordinary control flow (an
/// alternative simply is not taken) and never surfaces here; only a
/// top-level combinator that matches nothing, or matches a strict prefix of
/// its input, turns into an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The grammar did not match at the start of the input.
    #[error("the input does not match the grammar")]
    EmptyParse,
    /// A prefix parsed but input remains; `position` is the first
    /// unconsumed index.
    #[error("unexpected trailing input at position {position}")]
    TrailingInput { position: usize },
    /// Reserved for name resolution against a supplied schema document.
    #[error("a name does not resolve against the supplied metadata")]
    MetadataViolation,
}
