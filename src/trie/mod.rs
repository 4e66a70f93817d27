//! The nibble-trie Aho–Corasick automaton (Core A).
//!
//! Every input byte is inserted as two nibble transitions (high nibble, then
//! low nibble), giving each node a fixed 16-way fan-out instead of a 256-way
//! one. After `build`, fail links are path-compressed to the nearest
//! accepting ancestor and non-tree transitions are overwritten to point
//! directly at their fail target's child (goto compression), so matching
//! never backtracks.

mod cut;
mod dict;

use std::collections::VecDeque;

use crate::error::{Error, Result};
use crate::state_id::{usize_to_node_id, NodeId};
use crate::utf8;

const MAX_FREQ: u32 = 1 << 24;
const MAX_LENGTH: usize = u8::MAX as usize;
const INIT_CAPACITY: usize = 2048;

/// A single trie node.
///
/// `ch` is always fully populated after `build` (goto compression): for
/// nibbles with no tree edge, the slot is overwritten to point at the fail
/// target's corresponding child, so every transition is O(1) with no
/// fallback walk at match time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<N: NodeId> {
    pub id: N,
    pub parent: N,
    pub ch: [N; 16],
    pub pre: N,
    pub fail: N,
    /// Accumulated frequency of keywords ending at this node. Zero means
    /// this node is not accepting.
    pub end: u32,
    /// UTF-8 character count of the accepted keyword (0 if non-accepting).
    pub length: u8,
    /// Subtree sum of `end`, valid only after `build`.
    pub trie_sum: u64,
    pub log_end: f64,
    pub log_trie_sum: f64,
}

impl<N: NodeId> Node<N> {
    fn new(id: N, parent: N) -> Self {
        Node {
            id,
            parent,
            ch: [N::root(); 16],
            pre: parent,
            fail: N::root(),
            end: 0,
            length: 0,
            trie_sum: 0,
            log_end: 0.0,
            log_trie_sum: 0.0,
        }
    }
}

/// The nibble-trie Aho–Corasick automaton.
///
/// `N` is the node identifier width; it defaults to `u32`, matching this
/// crate's 32-bit node-index target. Insert keywords with [`Trie::insert`]
/// or [`Trie::load_dict`], then call [`Trie::build`] once before using
/// [`Trie::cut`] or any `trans_*`/`get_borders` query.
pub struct Trie<N: NodeId = u32> {
    word_count: u32,
    cur_state: N,
    nodes: Vec<Node<N>>,
    built: bool,
}

impl<N: NodeId> Default for Trie<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> Trie<N> {
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(INIT_CAPACITY);
        nodes.push(Node::new(N::root(), N::root()));
        Trie {
            word_count: 0,
            cur_state: N::root(),
            nodes,
            built: false,
        }
    }

    /// Number of distinct keywords inserted (re-inserting an existing
    /// keyword sums frequencies rather than counting it twice).
    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Number of nodes in the trie, including the root.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_state(&self) -> N {
        self.cur_state
    }

    pub fn reset(&mut self, state: N) {
        self.cur_state = state;
    }

    pub fn reset_to_root(&mut self) {
        self.cur_state = N::root();
    }

    pub fn get_node(&self, id: N) -> Result<Node<N>> {
        self.nodes
            .get(id.to_usize())
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index: id.to_usize() as u64,
                len: self.nodes.len(),
            })
    }

    fn current_node(&self) -> &Node<N> {
        &self.nodes[self.cur_state.to_usize()]
    }

    /// Advances the current state by one byte, split into a high-nibble then
    /// low-nibble transition. Internal fast path used by `cut`'s hot loop;
    /// does not allocate or clone.
    fn step_byte(&mut self, byte: u8) {
        let u = self.cur_state;
        let hi = self.nodes[u.to_usize()].ch[(byte >> 4) as usize];
        let lo = self.nodes[hi.to_usize()].ch[(byte & 0x0F) as usize];
        self.cur_state = lo;
    }

    pub fn trans_byte(&mut self, byte: u8) -> Node<N> {
        self.step_byte(byte);
        *self.current_node()
    }

    pub fn trans_string(&mut self, s: &str) -> Result<Node<N>> {
        if !utf8::is_valid(s.as_bytes()) {
            return Err(Error::InvalidUtf8);
        }
        for &b in s.as_bytes() {
            self.step_byte(b);
        }
        Ok(*self.current_node())
    }

    /// Returns the chain `node, fail[node], fail[fail[node]], …` up to (but
    /// excluding) the root. Because `fail` is path-compressed to accepting
    /// states after `build`, this enumerates every keyword ending at
    /// `node`'s input position — including non-accepting entries the
    /// caller is expected to filter (the node itself, before compression
    /// skips past it).
    pub fn get_borders(&self, node_id: N) -> Result<Vec<Node<N>>> {
        let mut cur = self.get_node(node_id)?;
        let mut borders = Vec::new();
        while cur.id != N::root() {
            borders.push(cur);
            cur = self.nodes[cur.fail.to_usize()];
        }
        Ok(borders)
    }

    /// Inserts `s` with the given frequency (defaults are the caller's
    /// concern; this crate always requires an explicit `freq`). Inserting
    /// the same keyword twice sums the frequencies.
    ///
    /// # Errors
    ///
    /// `InvalidUtf8` if `s` isn't well-formed UTF-8, `LengthOverflow` if its
    /// character count exceeds the node `length` field's capacity,
    /// `FrequencyOverflow` if accumulating `freq` would exceed the `end`
    /// field's capacity, or `InvariantViolated` if called after `build`.
    pub fn insert(&mut self, s: &str, freq: u32) -> Result<()> {
        if self.built {
            return Err(Error::InvariantViolated(
                "insert called after build: goto compression has already \
                 overwritten non-tree ch[] slots",
            ));
        }

        let bytes = s.as_bytes();
        let length = utf8::count_chars(bytes).ok_or(Error::InvalidUtf8)?;
        if length > MAX_LENGTH {
            return Err(Error::LengthOverflow { len: length });
        }

        let mut u = N::root();
        for &byte in bytes {
            u = self.insert_nibble(u, byte >> 4)?;
            u = self.insert_nibble(u, byte & 0x0F)?;
        }

        let node = &mut self.nodes[u.to_usize()];
        if node.end == 0 {
            self.word_count += 1;
        }
        let new_end = node
            .end
            .checked_add(freq)
            .filter(|&v| v <= MAX_FREQ)
            .ok_or(Error::FrequencyOverflow {
                current: node.end,
                added: freq,
            })?;
        node.end = new_end;
        node.length = length as u8;

        log::trace!("insert {:?} freq={} -> node {}", s, freq, u.to_usize());
        Ok(())
    }

    /// Walks (or creates) the tree edge from `u` over one nibble. A slot is
    /// considered empty when it is the root sentinel OR the child it points
    /// to has a different `parent` (a compressed fail shortcut left over
    /// from a previous `build`).
    fn insert_nibble(&mut self, u: N, nibble: u8) -> Result<N> {
        let nibble = nibble as usize;
        let existing = self.nodes[u.to_usize()].ch[nibble];
        let is_tree_edge = existing != N::root() && self.nodes[existing.to_usize()].parent == u;

        if is_tree_edge {
            return Ok(existing);
        }

        let new_id = usize_to_node_id::<N>(self.nodes.len()).ok_or(Error::InvariantViolated(
            "node count exceeds the configured node-index width",
        ))?;
        self.nodes.push(Node::new(new_id, u));
        self.nodes[u.to_usize()].ch[nibble] = new_id;
        Ok(new_id)
    }

    /// Finalizes the automaton: computes subtree frequency sums and their
    /// logs, builds Aho–Corasick fail links with goto compression, and
    /// path-compresses both `fail` and `pre` chains to the nearest
    /// accepting ancestor. No further `insert` is permitted afterward.
    ///
    /// Calling `build` again (e.g. after no further inserts) is safe: both
    /// passes are pure functions of already-finalized node data.
    pub fn build(&mut self) -> Result<()> {
        self.nodes.shrink_to_fit();

        self.compute_trie_sums();
        self.compress_chain(|node| node.pre, |node, v| node.pre = v);
        self.compute_fail_links();
        self.compress_chain(|node| node.fail, |node, v| node.fail = v);

        self.built = true;
        log::debug!(
            "build complete: {} nodes, {} words",
            self.nodes.len(),
            self.word_count
        );
        Ok(())
    }

    /// Node ids are assigned in creation order, so every non-root node's
    /// parent has a strictly smaller id. Walking from the highest id down
    /// to the root therefore computes every subtree sum in one pass.
    fn compute_trie_sums(&mut self) {
        for node in &mut self.nodes {
            node.trie_sum = node.end as u64;
        }
        for i in (1..self.nodes.len()).rev() {
            let parent = self.nodes[i].parent.to_usize();
            let sum = self.nodes[i].trie_sum;
            self.nodes[parent].trie_sum += sum;
        }
        for node in &mut self.nodes {
            node.log_end = (node.end as f64).ln();
            node.log_trie_sum = (node.trie_sum as f64).ln();
        }
    }

    /// Path-compresses the chain selected by `get`/`set` (either `pre` or
    /// `fail`) so every non-root node points directly at the nearest
    /// ancestor with `end > 0`, or at the root if none exists.
    fn compress_chain(
        &mut self,
        get: impl Fn(&Node<N>) -> N,
        set: impl Fn(&mut Node<N>, N),
    ) {
        for i in 1..self.nodes.len() {
            let mut p = get(&self.nodes[i]);
            while p != N::root() && self.nodes[p.to_usize()].end == 0 {
                p = get(&self.nodes[p.to_usize()]);
            }
            set(&mut self.nodes[i], p);
        }
    }

    /// BFS over tree edges from the root's children, assigning `fail` links
    /// and overwriting non-tree transitions to point at the fail target's
    /// child (goto compression). Afterward every `(node, nibble)` pair has
    /// a defined O(1) transition and the trie behaves as a DFA.
    fn compute_fail_links(&mut self) {
        let mut queue = VecDeque::new();
        for i in 0..16 {
            let v = self.nodes[N::root().to_usize()].ch[i];
            if v != N::root() && self.nodes[v.to_usize()].parent == N::root() {
                queue.push_back(v);
            }
        }

        while let Some(u) = queue.pop_front() {
            let fail_u = self.nodes[u.to_usize()].fail;
            for i in 0..16 {
                let v = self.nodes[u.to_usize()].ch[i];
                let is_tree_edge = v != N::root() && self.nodes[v.to_usize()].parent == u;
                let fail_target = self.nodes[fail_u.to_usize()].ch[i];
                if is_tree_edge {
                    self.nodes[v.to_usize()].fail = fail_target;
                    queue.push_back(v);
                } else {
                    self.nodes[u.to_usize()].ch[i] = fail_target;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_sample() -> Trie<u32> {
        let mut trie = Trie::new();
        trie.insert("武汉", 10).unwrap();
        trie.insert("武汉市", 5).unwrap();
        trie.insert("长江", 8).unwrap();
        trie.insert("长江大桥", 3).unwrap();
        trie.insert("大桥", 4).unwrap();
        trie.insert("市长", 6).unwrap();
        trie.build().unwrap();
        trie
    }

    #[test]
    fn insert_same_keyword_twice_sums_frequency() {
        let mut trie = Trie::<u32>::new();
        trie.insert("a", 1).unwrap();
        trie.insert("a", 2).unwrap();
        trie.build().unwrap();

        assert_eq!(trie.word_count(), 1);
        let node = trie.trans_string("a").unwrap();
        assert_eq!(node.end, 3);
    }

    #[test]
    fn trie_sum_root_equals_sum_of_all_ends() {
        let trie = build_sample();
        let total: u64 = (0..trie.node_count())
            .map(|i| trie.get_node(trie_id(i)).unwrap().end as u64)
            .sum();
        let root = trie.get_node(0).unwrap();
        assert_eq!(root.trie_sum, total);
    }

    #[test]
    fn traversal_lands_on_accepting_node_with_matching_length() {
        let trie = build_sample();
        let mut trie = trie;
        trie.reset_to_root();
        let node = trie.trans_string("长江大桥").unwrap();
        assert!(node.end >= 3);
        assert_eq!(node.length as usize, 4);
    }

    #[test]
    fn goto_compression_fills_every_root_slot() {
        let trie = build_sample();
        let root = trie.get_node(0).unwrap();
        for &target in &root.ch {
            let is_root_or_child = target == 0 || trie.get_node(target).unwrap().parent == 0;
            assert!(is_root_or_child);
        }
    }

    #[test]
    fn fail_links_point_to_root_or_an_accepting_node() {
        let trie = build_sample();
        for i in 0..trie.node_count() {
            let node = trie.get_node(trie_id(i)).unwrap();
            assert!(node.fail == 0 || trie.get_node(node.fail).unwrap().end > 0);
        }
    }

    #[test]
    fn insert_after_build_is_rejected() {
        let mut trie = build_sample();
        let err = trie.insert("新华", 1);
        assert!(matches!(err, Err(Error::InvariantViolated(_))));
    }

    fn trie_id(i: usize) -> u32 {
        i as u32
    }
}
