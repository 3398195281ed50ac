use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rust_vcs::codec::{decode, encode, encode_seeded, stack};
use rust_vcs::tools::{QrOptions, render_qr};
use rust_vcs::{BinaryImage, PatternTable};

fn qr_secret(module_px: usize) -> BinaryImage {
    let opts = QrOptions {
        module_px,
        ..QrOptions::default()
    };
    render_qr("student:1042|Grace Hopper|CS-2026", &opts).expect("payload fits a QR code")
}

fn bench_encode(c: &mut Criterion) {
    let table = PatternTable::default();
    let mut group = c.benchmark_group("encode");
    for module_px in [4usize, 10, 20] {
        let secret = qr_secret(module_px);
        let label = format!("{}x{}", secret.width(), secret.height());

        group.bench_with_input(BenchmarkId::new("rng", &label), &secret, |b, s| {
            let mut rng = ChaCha20Rng::seed_from_u64(1);
            b.iter(|| encode(black_box(s), &table, &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("seeded", &label), &secret, |b, s| {
            b.iter(|| encode_seeded(black_box(s), &table, black_box(7)))
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let table = PatternTable::default();
    let mut group = c.benchmark_group("decode");
    for module_px in [4usize, 10, 20] {
        let secret = qr_secret(module_px);
        let label = format!("{}x{}", secret.width(), secret.height());
        let pair = encode_seeded(&secret, &table, 7).expect("encode");

        group.bench_with_input(BenchmarkId::new("high_contrast", &label), &pair, |b, p| {
            b.iter(|| decode(black_box(&p.first), black_box(&p.second)))
        });
        group.bench_with_input(BenchmarkId::new("stacked", &label), &pair, |b, p| {
            b.iter(|| stack(black_box(&p.first), black_box(&p.second)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
