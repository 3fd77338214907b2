use criterion::*;
use rand::prelude::*;
use rawdec::*;

fn corpus(n: usize) -> Raw {
    let mut rng = StdRng::seed_from_u64(718);
    Raw::Seq(
        (0..n)
            .map(|_| match rng.gen_range(0..3) {
                0 => Raw::from(rng.gen::<u32>()),
                1 => Raw::from(rng.gen::<f64>()),
                _ => Raw::from(rng.gen::<f64>().to_string()),
            })
            .collect(),
    )
}

fn decode_benches(c: &mut Criterion) {
    let d = DecoderSet::new();

    let numbers = d.array(d.number());
    let raw = corpus(1024);
    c.bench_function("array of 1024 mixed numbers", |b| {
        b.iter(|| numbers.decode(black_box(&raw)))
    });

    let record = d.object((
        field("a", "A", d.number()),
        field("b", "B", d.string()),
        field("c", "C", d.boolean_or(false)),
    ));
    let raw = Raw::from_json_str(r#"{ "A": "5", "B": "x", "C": 1 }"#).unwrap();
    c.bench_function("three field object", |b| {
        b.iter(|| record.decode(black_box(&raw)))
    });

    let dates = d.array(d.date());
    let raw = Raw::Seq(
        (0..256)
            .map(|i| Raw::from(format!("2026-03-{:02}T09:30:00Z", (i % 28) + 1)))
            .collect(),
    );
    c.bench_function("array of 256 dates", |b| {
        b.iter(|| dates.decode(black_box(&raw)))
    });
}

criterion_group!(benches, decode_benches);
criterion_main!(benches);
