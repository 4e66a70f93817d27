//! A nibble-trie Aho–Corasick automaton for dictionary-driven Chinese word
//! segmentation, paired with a UTF-8-aligned suffix array for n-gram
//! statistics (occurrence counts, next-character probability, branching
//! entropy, and pointwise mutual information).
//!
//! [`trie::Trie`] is the segmenter: load a frequency-weighted dictionary,
//! `build()` it once, then call [`trie::Trie::cut`] to split text into its
//! maximum-probability sequence of words. [`suffix_array::SuffixArray`] is
//! the statistics engine: index a corpus once, then query substrings for
//! how often and how predictably they occur.

mod error;
mod state_id;
mod suffix_array;
mod trie;
mod utf8;

pub use error::{Error, Result};
pub use state_id::NodeId;
pub use suffix_array::SuffixArray;
pub use trie::{Node, Trie};
