//! Benchmarks for the record store and document codec
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use turnout::record::Record;
use turnout::store::Store;
use turnout::sync::{decode_document, encode_document};

fn create_test_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                format!("Firefighter {}", i % 25),
                format!("{:04}", i),
                "Helmet, Coat",
                format!("Officer {}", i % 5),
            )
            .inspection(i % 3 == 0)
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1000, 10000] {
        let store = Store::from_records(create_test_records(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("by_name_{}", size), |b| {
            b.iter(|| store.search(black_box("firefighter 7")).count())
        });

        group.bench_function(format!("by_serial_{}", size), |b| {
            b.iter(|| store.search(black_box("0042")).count())
        });
    }

    group.finish();
}

fn bench_count_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_by");

    for size in [100, 1000, 10000] {
        let store = Store::from_records(create_test_records(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("name_{}", size), |b| {
            b.iter(|| store.count_by(|record| record.name.clone()).len())
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for size in [100, 1000, 10000] {
        let records = create_test_records(size);
        let body = encode_document(&records).unwrap();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("encode_{}", size), |b| {
            b.iter(|| encode_document(black_box(&records)).unwrap())
        });

        group.bench_function(format!("decode_{}", size), |b| {
            b.iter(|| decode_document(black_box(&body)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_search, bench_count_by, bench_codec);
criterion_main!(benches);
