use trie_gram::SuffixArray;

#[test]
fn abab_scenario_from_the_design_notes() {
    let sa = SuffixArray::new("abab");
    assert_eq!(sa.size(), 4);

    let ordered: Vec<&str> = (1..=sa.size()).map(|r| sa.get_suf(r).unwrap()).collect();
    assert_eq!(ordered, vec!["ab", "abab", "b", "bab"]);
    assert_eq!(sa.get_count("ab"), 2);
}

#[test]
fn mutual_information_is_large_for_a_frequent_tightly_bound_bigram() {
    let corpus = "武汉武汉武汉武汉武汉武汉汉江武汉江汉";
    let sa = SuffixArray::new(corpus);
    let wuhan = sa.get_mutual_information("武汉");
    let noise = sa.get_mutual_information("汉江");
    assert!(wuhan > noise);
}

#[test]
fn branch_entropy_reflects_the_self_suffix_excluded_distribution() {
    // "aaa" occurs twice in "aaaa", but one occurrence is the trailing
    // suffix itself (no following character), so get_prob("aaa") is
    // [("a", 0.5)], not [("a", 1.0)], and the entropy is nonzero.
    let sa = SuffixArray::new("aaaa");
    let entropy = sa.get_branch_entropy("aaa");
    assert!((entropy - 0.346_573_59).abs() < 1e-6);
}

#[test]
fn get_count_is_zero_for_a_pattern_longer_than_the_text() {
    let sa = SuffixArray::new("ab");
    assert_eq!(sa.get_count("abcdef"), 0);
}

#[test]
fn ranks_are_stable_under_repeated_queries() {
    let sa = SuffixArray::new("mississippi");
    let first = sa.get_count("issi");
    let second = sa.get_count("issi");
    assert_eq!(first, second);
    assert_eq!(first, 2);
}

#[test]
fn handles_multibyte_corpus_without_splitting_characters() {
    let sa = SuffixArray::new("你好你好世界");
    assert_eq!(sa.size(), 6);
    assert_eq!(sa.get_count("你好"), 2);
    for rank in 1..=sa.size() {
        let suf = sa.get_suf(rank).unwrap();
        assert!(suf.chars().next().is_some());
    }
}

#[test]
fn from_bytes_round_trips_valid_utf8() {
    let sa = SuffixArray::from_bytes("abab".as_bytes()).unwrap();
    assert_eq!(sa.size(), 4);
    assert_eq!(sa.get_count("ab"), 2);
}
