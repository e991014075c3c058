use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use tf_idf_tagger::{DictSegmenter, Idf, StopWord, TagExtractor, WhitespaceSegmenter};

const WORDS: &[&str] = &[
    "search", "index", "keyword", "summary", "ranking", "corpus", "token", "weight",
    "document", "frequency", "inverse", "rare", "common", "signal", "noise", "query",
];

fn sentence(len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(i * 7 + i / 3) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn idf() -> Idf {
    Idf::from_pairs(WORDS.iter().enumerate().map(|(i, w)| (*w, 1.0 + i as f64 * 0.5)))
}

fn extract_benchmark(c: &mut Criterion) {
    let text = sentence(2_000);
    let idf = Arc::new(idf());
    let stop = Arc::new(StopWord::new());

    let ws = TagExtractor::new(Arc::new(WhitespaceSegmenter), Arc::clone(&idf), Arc::clone(&stop));
    c.bench_function("extract_tags/whitespace", |b| b.iter(|| ws.extract_tags(&text, 10)));
    c.bench_function("cn_extract_tags/whitespace", |b| b.iter(|| ws.cn_extract_tags(&text, 10)));

    let mut dict = DictSegmenter::new();
    for (i, w) in WORDS.iter().enumerate() {
        dict.add_word(w, 10 + i as u64);
    }
    let dict_ex = TagExtractor::new(Arc::new(dict), idf, stop);
    let joined = text.replace(' ', "");
    c.bench_function("extract_tags/dict", |b| b.iter(|| dict_ex.extract_tags(&joined, 10)));

    let batch: Vec<String> = (0..64).map(|i| sentence(200 + i)).collect();
    c.bench_function("extract_tags_batch/64", |b| b.iter(|| ws.extract_tags_batch(&batch, 10)));
}

criterion_group!(benches, extract_benchmark);
criterion_main!(benches);
