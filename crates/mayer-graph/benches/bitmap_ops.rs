use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mayer_graph::{Bitmap, BitmapKind, Bitset};

fn bitmap_bench(c: &mut Criterion) {
    for (label, kind) in [
        ("word", BitmapKind::Word),
        ("vector", BitmapKind::Vector),
        ("big", BitmapKind::Big),
    ] {
        c.bench_function(&format!("inc_{label}_15_bits"), |b| {
            b.iter(|| {
                let mut store = Bitmap::with_kind(15, kind).unwrap();
                while store.inc() {}
                black_box(store.bit_count());
            });
        });
    }

    let left = Bitmap::from_words(2_000, &[0xdead_beef; 32]);
    let right = Bitmap::from_words(2_000, &[0x0123_4567; 32]);
    c.bench_function("xor_2000_bits", |b| {
        b.iter(|| black_box(left.xor(&right)));
    });
}

criterion_group!(benches, bitmap_bench);
criterion_main!(benches);
