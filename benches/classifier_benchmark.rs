use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nirupana::{is_malayalam, malayalam_ratio, LabelMap};

fn bench_script_gate(c: &mut Criterion) {
    let mut group = c.benchmark_group("ScriptGate");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Short review (~30 chars)
    group.bench_function("short_malayalam", |b| {
        b.iter(|| is_malayalam(black_box("ഈ സിനിമ വളരെ മനോഹരമായിരുന്നു")))
    });

    // Rejected input short-circuits after the ratio scan
    group.bench_function("short_latin", |b| {
        b.iter(|| is_malayalam(black_box("This movie was great")))
    });

    // Long mixed review (~3000 chars)
    let long_review = "കഥ super ആയിരുന്നു, പക്ഷേ climax കുറച്ചു മോശം ".repeat(64);
    group.bench_function("long_mixed", |b| {
        b.iter(|| malayalam_ratio(black_box(&long_review)))
    });

    group.finish();
}

fn bench_label_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("LabelMap");
    group.sample_size(50);

    let labels = LabelMap::default();
    group.bench_function("reverse_lookup", |b| {
        b.iter(|| labels.label_for(black_box(1)))
    });

    group.finish();
}

criterion_group!(benches, bench_script_gate, bench_label_lookup);
criterion_main!(benches);
