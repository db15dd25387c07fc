use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use blowfish_cbc::{BlowfishEngine, CbcCipher, Iv};

fn bench_cbc(c: &mut Criterion) {
    let engine = BlowfishEngine::with_key(b"benchmark key").expect("valid key");
    let cipher = CbcCipher::new(&engine, Iv::new(*b"bench iv"));

    let mut group = c.benchmark_group("blowfish_cbc");
    for size in [64usize, 1024, 16 * 1024] {
        let plaintext = vec![0x5au8; size];
        let ciphertext = cipher.encrypt(&plaintext).expect("encrypt");

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encrypt", size), &plaintext, |b, input| {
            b.iter(|| cipher.encrypt(black_box(input)))
        });
        group.bench_with_input(BenchmarkId::new("decrypt", size), &ciphertext, |b, input| {
            b.iter(|| cipher.decrypt(black_box(input)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_cbc);
criterion_main!(benches);
