//! Benchmarks for key encoding and decoding.

#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use keycoder::buffer::Reader;
use keycoder::encoding::{decode_key, pack_key, unpack_key};
use keycoder::index::IndexKeyBuilder;
use keycoder::{key, Element, Key, KeyCoder};
use num_bigint::BigInt;
use uuid::Uuid;

fn sample_keys() -> Vec<(&'static str, Key)> {
    vec![
        ("small_int", key![42]),
        ("negative_int", key![-1_234_567_890_i64]),
        ("big_int", key![BigInt::from(1) << 200]),
        ("text", key!["the quick brown fox jumps over the lazy dog"]),
        ("blob_1k", key![vec![0x66u8; 1024]]),
        ("uuid", key![Uuid::from_u128(0x0123_4567_89ab_cdef_0123_4567_89ab_cdef)]),
        ("tuple", key!["users", 42, true, Element::Null, "alice@example.com"]),
        ("nested", key![key!["a", key![1, key![2, key![3]]]], 7]),
    ]
}

/// Benchmark encoding of representative keys.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    for (name, key) in sample_keys() {
        let len = pack_key(&key).map(|b| b.len()).unwrap_or(0);
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &key, |b, key| {
            b.iter(|| pack_key(black_box(key)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark full decoding of representative keys.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    for (name, key) in sample_keys() {
        let bytes = pack_key(&key).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &bytes, |b, bytes| {
            b.iter(|| unpack_key(black_box(bytes)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark reading only the first element of a long key.
fn bench_decode_first_element(c: &mut Criterion) {
    let key: Key = (0..64).map(Element::from).collect();
    let bytes = pack_key(&key).unwrap();

    c.bench_function("decode_first_of_64", |b| {
        b.iter(|| decode_key(Reader::new(black_box(&bytes))).next());
    });
}

/// Benchmark sorting encoded keys against sorting decoded keys.
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_1000");
    let keys: Vec<Key> =
        (0..1000i64).map(|i| key![i % 7 - 3, format!("name-{}", (i * 7919) % 1000)]).collect();
    let encoded: Vec<Vec<u8>> = keys.iter().map(|k| pack_key(k).unwrap()).collect();
    group.throughput(Throughput::Elements(1000));

    group.bench_function("encoded", |b| {
        b.iter(|| {
            let mut v = encoded.clone();
            v.sort_unstable();
            v
        });
    });
    group.bench_function("decoded", |b| {
        b.iter(|| {
            let mut v = keys.clone();
            v.sort_unstable();
            v
        });
    });

    group.finish();
}

/// Benchmark building secondary index keys.
fn bench_index_keys(c: &mut Criterion) {
    let builder = IndexKeyBuilder::new(KeyCoder::default(), 12);
    let values = key!["london", 30];
    let primary = key![Uuid::from_u128(99)];

    c.bench_function("index_encode", |b| {
        b.iter(|| builder.encode(black_box(&values), black_box(&primary)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_decode_first_element,
    bench_sort,
    bench_index_keys
);
criterion_main!(benches);
