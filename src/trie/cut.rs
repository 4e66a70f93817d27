//! The Viterbi-style maximum-probability segmenter.

use crate::error::Result;
use crate::state_id::NodeId;

use super::Trie;

impl<N: NodeId> Trie<N> {
    /// Segments `text` into the maximum-probability sequence of dictionary
    /// words, ASCII digit/alphabetic runs, and single-character fallbacks.
    ///
    /// When `cut_all` is set, returns every accepting dictionary match (of
    /// length ≥ 2) in `text` plus every single-character segment, as a
    /// multiset with no attempt at picking one best segmentation — this is
    /// the "find all words" mode, not a partition of `text`.
    ///
    /// Does not mutate the automaton's externally visible state: the
    /// current traversal state is saved and restored around the call, so
    /// `cut` may be interleaved with `trans_byte`/`trans_string` calls.
    pub fn cut<'a>(&mut self, text: &'a str, cut_all: bool) -> Result<Vec<&'a str>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let min_prob = -self.get_node(N::root())?.log_trie_sum;

        let mut utf8_start: Vec<usize> = Vec::new();
        let mut max_prob: Vec<f64> = Vec::new();
        let mut pre: Vec<isize> = Vec::new();
        let mut words: Vec<&'a str> = Vec::new();

        let saved_state = self.get_state();
        self.reset_to_root();

        let mut num_start: isize = -1;
        let mut alpha_start: isize = -1;

        for (j, (byte_pos, ch)) in text.char_indices().enumerate() {
            let char_end = byte_pos + ch.len_utf8();
            utf8_start.push(byte_pos);
            max_prob.push(min_prob);
            pre.push(j as isize - 1);

            if ch.is_ascii_digit() {
                if num_start == -1 {
                    num_start = j as isize;
                } else {
                    let candidate = base_prob(&max_prob, num_start - 1) + min_prob / 2.0;
                    if candidate > max_prob[j] {
                        max_prob[j] = candidate;
                        pre[j] = num_start - 1;
                    }
                }
            } else {
                num_start = -1;
            }

            if ch.is_ascii_alphabetic() {
                if alpha_start == -1 {
                    alpha_start = j as isize;
                } else {
                    let candidate = base_prob(&max_prob, alpha_start - 1) + min_prob / 2.0;
                    if candidate > max_prob[j] {
                        max_prob[j] = candidate;
                        pre[j] = alpha_start - 1;
                    }
                }
            } else {
                alpha_start = -1;
            }

            if cut_all {
                words.push(&text[byte_pos..char_end]);
            }

            for b in text[byte_pos..char_end].bytes() {
                self.step_byte(b);
            }

            let state = self.get_state();
            for border in self.get_borders(state)? {
                if border.end == 0 {
                    continue;
                }
                let len_border = border.length as isize;
                let pre_node = self.get_node(border.pre)?;
                let prob_term = border.log_end - pre_node.log_trie_sum;
                let start_idx = j as isize - len_border;

                if cut_all && border.length >= 2 && start_idx >= -1 {
                    let start = utf8_start[(start_idx + 1) as usize];
                    words.push(&text[start..char_end]);
                }

                let candidate = base_prob(&max_prob, start_idx) + prob_term;
                if candidate > max_prob[j] {
                    max_prob[j] = candidate;
                    pre[j] = start_idx;
                }
            }
        }

        self.reset(saved_state);

        if cut_all {
            return Ok(words);
        }

        utf8_start.push(text.len());
        let mut j = max_prob.len() as isize - 1;
        while j >= 0 {
            let p = pre[j as usize];
            let start = utf8_start[(p + 1) as usize];
            let end = utf8_start[(j + 1) as usize];
            words.push(&text[start..end]);
            j = p;
        }
        words.reverse();
        Ok(words)
    }
}

/// `max_prob[idx]` with the implicit `max_prob[-1] = 0.0` convention: a
/// segmentation that hasn't consumed any characters yet has accumulated
/// log-probability zero (probability one).
fn base_prob(max_prob: &[f64], idx: isize) -> f64 {
    if idx < 0 {
        0.0
    } else {
        max_prob[idx as usize]
    }
}
