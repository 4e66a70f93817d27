use std::path::PathBuf;

/// The error taxonomy for this crate.
///
/// Every public fallible operation returns `Result<_, Error>`. There is no
/// implicit retry or recovery; callers see errors synchronously.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A byte sequence passed to `insert`, `cut`, or `SuffixArray::new` is not
    /// well-formed UTF-8.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,

    /// A dictionary file could not be opened or read.
    #[error("failed to read dictionary file {path}: {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Adding `freq` to an accepting node's `end` counter would exceed its
    /// capacity (24 bits, mirroring the reference implementation's
    /// `MAX_FREQ`).
    #[error("frequency overflow: adding {added} to {current} would exceed capacity")]
    FrequencyOverflow { current: u32, added: u32 },

    /// A keyword's UTF-8 character count exceeds the capacity of the node's
    /// `length` field (8 bits).
    #[error("keyword length {len} exceeds the stored length field's capacity")]
    LengthOverflow { len: usize },

    /// `get_node`/`get_id` (or similar) was called with an index that isn't a
    /// valid node id / suffix rank.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: u64, len: usize },

    /// A precondition of the data structure's lifecycle was violated, e.g.
    /// `insert` called after `build`.
    #[error("invariant violated: {0}")]
    InvariantViolated(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
