use criterion::{criterion_group, criterion_main, Criterion};
use irs_core::tokenizer::{normalize_document, normalize_query};
use irs_core::DocumentCounts;

const PAGE: &str = "Information retrieval systems rank documents against free-text queries. \
    The ranking function combines term frequency, inverse document frequency and a \
    document-length normalization; see sections 3.1-3.4 and/or the appendix, pp. 12/13.";

fn bench_normalize(c: &mut Criterion) {
    let text = PAGE.repeat(200);
    c.bench_function("normalize_document", |b| b.iter(|| normalize_document(&text, 30)));
    c.bench_function("normalize_query", |b| b.iter(|| normalize_query("ranking documents by term frequency")));

    let pages: Vec<String> = (0..20).map(|_| PAGE.repeat(10)).collect();
    c.bench_function("document_counts", |b| b.iter(|| DocumentCounts::from_blocks("bench", &pages, 30)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
