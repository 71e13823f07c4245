use criterion::{Criterion, black_box, criterion_group, criterion_main};

use wordmix::config::Config;
use wordmix::engine::dictionary::{Dictionary, WordSource};
use wordmix::engine::matcher::{is_subword, match_all};
use wordmix::engine::sequencer::TargetSequencer;

/// Synthetic dictionary: every 3..6-letter prefix-rotation of a fixed
/// alphabet, large enough to make match_all scan a few thousand entries.
fn big_dictionary() -> Dictionary {
    let letters = ['a', 'e', 'n', 'p', 'l', 't', 'r', 's', 'd', 'g'];
    let mut lines = String::new();
    for len in 3..=6 {
        for start in 0..letters.len() {
            for step in 1..letters.len() {
                let word: String = (0..len)
                    .map(|i| letters[(start + i * step) % letters.len()])
                    .collect();
                lines.push_str(&word);
                lines.push('\n');
            }
        }
    }
    Dictionary::load(WordSource::Memory(lines), &Config::default()).unwrap()
}

fn bench_is_subword(c: &mut Criterion) {
    c.bench_function("is_subword hit", |b| {
        b.iter(|| is_subword(black_box("PLAN"), black_box("PLANET")))
    });
    c.bench_function("is_subword multiplicity miss", |b| {
        b.iter(|| is_subword(black_box("AAB"), black_box("ABC")))
    });
}

fn bench_match_all(c: &mut Criterion) {
    let dictionary = big_dictionary();
    c.bench_function("match_all over synthetic dictionary", |b| {
        b.iter(|| match_all(black_box(&dictionary), black_box("PLANET")))
    });
}

fn bench_sequencer_next(c: &mut Criterion) {
    let dictionary = big_dictionary();
    c.bench_function("sequencer next", |b| {
        b.iter(|| {
            let mut sequencer = TargetSequencer::new(&dictionary, 6, 6, 8);
            sequencer.shuffle(42, 0);
            sequencer.next(black_box(&dictionary), 5, false)
        })
    });
}

criterion_group!(
    benches,
    bench_is_subword,
    bench_match_all,
    bench_sequencer_next
);
criterion_main!(benches);
