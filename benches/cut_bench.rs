use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trie_gram::Trie;

const DICTIONARY: &[(&str, u32)] = &[
    ("武汉", 10),
    ("武汉市", 5),
    ("长江", 8),
    ("长江大桥", 3),
    ("大桥", 4),
    ("市长", 6),
    ("中国", 20),
    ("中华人民共和国", 2),
    ("人民", 15),
    ("共和国", 7),
    ("北京", 18),
    ("北京市", 4),
    ("上海", 16),
    ("上海市", 5),
];

fn build_trie() -> Trie<u32> {
    let mut trie = Trie::new();
    for &(word, freq) in DICTIONARY {
        trie.insert(word, freq).unwrap();
    }
    trie.build().unwrap();
    trie
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("trie_build", |b| {
        b.iter(build_trie);
    });
}

fn bench_cut(c: &mut Criterion) {
    let mut trie = build_trie();
    let text = "中华人民共和国的首都是北京市，长江流经武汉市，武汉市长江大桥横跨长江。"
        .repeat(20);

    c.bench_function("trie_cut", |b| {
        b.iter(|| trie.cut(black_box(&text), false).unwrap());
    });
}

fn bench_cut_all(c: &mut Criterion) {
    let mut trie = build_trie();
    let text = "中华人民共和国的首都是北京市，长江流经武汉市，武汉市长江大桥横跨长江。"
        .repeat(20);

    c.bench_function("trie_cut_all", |b| {
        b.iter(|| trie.cut(black_box(&text), true).unwrap());
    });
}

criterion_group!(benches, bench_build, bench_cut, bench_cut_all);
criterion_main!(benches);
