//! The UTF-8-aligned suffix array (Core B).
//!
//! Construction runs a byte-level prefix-doubling suffix sort over the
//! whole string, then restricts and renumbers ranks down to the subset of
//! suffixes that start on a UTF-8 character boundary — queries only ever
//! see whole characters, never a dangling continuation byte.

use crate::error::{Error, Result};
use crate::utf8;

/// A suffix array over a UTF-8 string, with n-gram count/probability/
/// entropy/PMI queries layered on top.
///
/// Ranks and suffix ids are both 1-indexed over the `k` UTF-8 characters in
/// the string (`size() == k`); index 0 is an unused sentinel slot, kept so
/// the binary searches below never need a special case for "no suffix
/// matched".
pub struct SuffixArray {
    s: Box<str>,
    /// `sa[rank]` = byte offset of the character that starts the suffix of
    /// that rank. Valid for `rank` in `1..=size()`.
    sa: Vec<usize>,
    /// `rk[i]` = rank (1-indexed) of the suffix starting at the `i`-th
    /// UTF-8 character (0-indexed character ordinal, not byte offset).
    rk: Vec<usize>,
}

impl SuffixArray {
    /// Builds the suffix array over `s`. `&str` is already guaranteed
    /// well-formed UTF-8, so this never fails.
    pub fn new(s: &str) -> Self {
        Self::build(s)
    }

    /// Builds the suffix array over `bytes`, validating UTF-8 first.
    ///
    /// Full strict validation (not the shallow leading-byte check used
    /// elsewhere in this crate) is required here: queries slice `s` at
    /// character-boundary byte offsets and return `&str`, which is only
    /// sound if every continuation byte is well-formed too.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let s = std::str::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)?;
        Ok(Self::build(s))
    }

    fn build(s: &str) -> Self {
        let bytes = s.as_bytes();
        let rk_byte = byte_suffix_array(bytes);

        let char_starts: Vec<usize> = s.char_indices().map(|(i, _)| i).collect();
        let mut real_rk: Vec<usize> = char_starts.iter().map(|&off| rk_byte[off + 1]).collect();
        real_rk.sort_unstable();

        let k = char_starts.len();
        let mut rk = vec![0usize; k];
        let mut sa = vec![0usize; k + 1];
        for (i, &off) in char_starts.iter().enumerate() {
            let value = rk_byte[off + 1];
            let rank = real_rk.partition_point(|&x| x < value) + 1;
            rk[i] = rank;
            sa[rank] = off;
        }

        SuffixArray {
            s: s.into(),
            sa,
            rk,
        }
    }

    /// Number of UTF-8 characters indexed (ranks run `1..=size()`).
    pub fn size(&self) -> usize {
        self.rk.len()
    }

    /// Byte offset of the suffix with the given 1-indexed rank.
    pub fn get_id(&self, rank: usize) -> Result<usize> {
        self.sa
            .get(rank)
            .copied()
            .filter(|_| rank >= 1)
            .ok_or(Error::IndexOutOfRange {
                index: rank as u64,
                len: self.size(),
            })
    }

    /// The suffix with the given 1-indexed rank, as a string slice to the
    /// end of the indexed text.
    pub fn get_suf(&self, rank: usize) -> Result<&str> {
        let id = self.get_id(rank)?;
        Ok(&self.s[id..])
    }

    /// Rank of the suffix starting at the `char_index`-th UTF-8 character
    /// (0-indexed character ordinal, not byte offset).
    pub fn get_rank(&self, char_index: usize) -> Result<usize> {
        self.rk
            .get(char_index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index: char_index as u64,
                len: self.size(),
            })
    }

    fn suffix_lt_pattern(&self, pos: usize, pattern: &[u8]) -> bool {
        let bytes = self.s.as_bytes();
        for (k, &pb) in pattern.iter().enumerate() {
            if pos + k >= bytes.len() {
                return true;
            }
            let sb = bytes[pos + k];
            if sb != pb {
                return sb < pb;
            }
        }
        false
    }

    fn pattern_lt_suffix(&self, pattern: &[u8], pos: usize) -> bool {
        let bytes = self.s.as_bytes();
        for (k, &pb) in pattern.iter().enumerate() {
            if pos + k >= bytes.len() {
                return false;
            }
            let sb = bytes[pos + k];
            if pb != sb {
                return pb < sb;
            }
        }
        false
    }

    /// First rank `r` such that `get_suf(r) >= pattern` (1-indexed; may
    /// equal `size() + 1` if every suffix is smaller).
    fn lower_bound(&self, pattern: &[u8]) -> usize {
        let mut l = 1usize;
        let mut r = self.size() + 1;
        while l < r {
            let mid = (l + r) / 2;
            if mid != self.size() + 1 && self.suffix_lt_pattern(self.sa[mid], pattern) {
                l = mid + 1;
            } else {
                r = mid;
            }
        }
        l
    }

    /// First rank `r` such that `get_suf(r) > pattern`.
    fn upper_bound(&self, pattern: &[u8]) -> usize {
        let mut l = 1usize;
        let mut r = self.size() + 1;
        while l < r {
            let mid = (l + r) / 2;
            if mid == self.size() + 1 || self.pattern_lt_suffix(pattern, self.sa[mid]) {
                r = mid;
            } else {
                l = mid + 1;
            }
        }
        l
    }

    /// Number of UTF-8-aligned occurrences of `t` in the indexed text.
    pub fn get_count(&self, t: &str) -> usize {
        let pattern = t.as_bytes();
        self.upper_bound(pattern) - self.lower_bound(pattern)
    }

    /// Distribution of the character immediately following each occurrence
    /// of `t`, as `(following_char, probability)` pairs summing to 1.0.
    ///
    /// The occurrence of `t` that is itself a suffix of the whole text (no
    /// following character) is excluded from the distribution, per the
    /// reference's `get_id(p) == s.len() - t.len()` rule, compared here as
    /// byte offsets. If `t` never occurs, or only occurs as that trailing
    /// suffix, returns the single entry `("[UNK]", 0.0)`.
    pub fn get_prob(&self, t: &str) -> Vec<(String, f64)> {
        let pattern = t.as_bytes();
        let l = self.lower_bound(pattern);
        let r = self.upper_bound(pattern);
        let mut p = l;
        if l < r && self.sa[p] == self.s.len() - pattern.len() {
            p += 1;
        }

        let mut prob = Vec::new();
        while p < r {
            let id_p = self.sa[p];
            let next_byte = self.s.as_bytes()[id_p + pattern.len()];
            let next_len = utf8::char_len(next_byte).unwrap_or(1);
            let sub_end = id_p + pattern.len() + next_len;
            let sub = &self.s[id_p..sub_end];

            let mut lo = p;
            let mut hi = r;
            while lo < hi {
                let mid = (lo + hi) / 2;
                let less = mid == r || self.pattern_lt_suffix(sub.as_bytes(), self.sa[mid]);
                if less {
                    hi = mid;
                } else {
                    lo = mid + 1;
                }
            }

            let continuation = &sub[pattern.len()..];
            prob.push((continuation.to_string(), (lo - p) as f64 / (r - l) as f64));
            p = lo;
        }

        if prob.is_empty() {
            prob.push(("[UNK]".to_string(), 0.0));
        }
        prob
    }

    /// Shannon entropy of `get_prob(t)`'s distribution.
    pub fn get_branch_entropy(&self, t: &str) -> f64 {
        self.get_prob(t)
            .iter()
            .map(|(_, prob)| -prob * (prob + 1e-20).ln())
            .sum()
    }

    /// Minimum pointwise mutual information between the two halves of `t`,
    /// taken over every internal UTF-8 character split point. Returns 0 for
    /// inputs shorter than two characters or that never occur.
    ///
    /// Unlike the reference (which guards this on byte length and so
    /// mishandles a single multi-byte character), the length check here
    /// counts UTF-8 characters.
    pub fn get_mutual_information(&self, t: &str) -> f64 {
        let char_offsets: Vec<usize> = t.char_indices().map(|(i, _)| i).collect();
        if char_offsets.len() <= 1 {
            return 0.0;
        }

        let count = self.get_count(t);
        if count == 0 {
            return 0.0;
        }

        let log_total = (self.size() as f64).ln();
        let log_count = (count as f64).ln();

        let mut pmi = f64::INFINITY;
        for &split in &char_offsets[1..] {
            let left_count = self.get_count(&t[..split]);
            let right_count = self.get_count(&t[split..]);
            let candidate =
                log_total + log_count - (left_count as f64).ln() - (right_count as f64).ln();
            pmi = pmi.min(candidate);
        }
        pmi
    }
}

/// Prefix-doubling radix sort over the raw bytes of `bytes`, 1-indexed
/// (`sa[0]`/`rk[0]` are unused sentinels). `rk` is allocated with length
/// `2 * n + 1` so the rank-comparison step can read one `len` past the end
/// of a suffix without bounds-checking: those slots are always 0 and never
/// written, giving "past the end of the string" the smallest possible rank.
fn byte_suffix_array(bytes: &[u8]) -> Vec<usize> {
    let n = bytes.len();
    let alphabet = 256usize;
    let mut m = alphabet;
    let mut cnt = vec![0usize; n.max(alphabet) + 1];
    let mut rk = vec![0usize; 2 * n + 1];
    let mut oldrk = vec![0usize; 2 * n + 1];
    let mut sa = vec![0usize; n + 1];
    let mut id = vec![0usize; n + 1];
    let mut key = vec![0usize; n + 1];

    for i in 1..=n {
        rk[i] = bytes[i - 1] as usize;
        cnt[rk[i]] += 1;
    }
    for i in 1..=m {
        cnt[i] += cnt[i - 1];
    }
    for i in (1..=n).rev() {
        sa[cnt[rk[i]]] = i;
        cnt[rk[i]] -= 1;
    }

    let mut len = 1usize;
    while len <= n {
        let mut p = 0usize;
        for i in (n - len + 1..=n).rev() {
            p += 1;
            id[p] = i;
        }
        for i in 1..=n {
            if sa[i] > len {
                p += 1;
                id[p] = sa[i] - len;
            }
        }

        cnt[..=m].fill(0);
        for i in 1..=n {
            key[i] = rk[id[i]];
            cnt[key[i]] += 1;
        }
        for i in 1..=m {
            cnt[i] += cnt[i - 1];
        }
        for i in (1..=n).rev() {
            sa[cnt[key[i]]] = id[i];
            cnt[key[i]] -= 1;
        }

        oldrk.copy_from_slice(&rk);
        let mut p = 0usize;
        for i in 1..=n {
            let same =
                oldrk[sa[i - 1]] == oldrk[sa[i]] && oldrk[sa[i - 1] + len] == oldrk[sa[i] + len];
            if !same {
                p += 1;
            }
            rk[sa[i]] = p;
        }

        if p == n {
            break;
        }
        m = p;
        len <<= 1;
    }

    rk
}
