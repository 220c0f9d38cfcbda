//! 可扩展哈希索引性能基准测试

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use extendible_hashing::{batch_insert, ExtendibleHash, ExtendibleHashConfig, HashValue};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// 基准测试配置
const SEED: u64 = 42;
const ITEM_COUNTS: [usize; 3] = [1_000, 10_000, 100_000];
const BUCKET_CAPACITIES: [usize; 3] = [3, 16, 64];

/// 生成随机值
fn generate_values(count: usize) -> Vec<HashValue> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..count).map(|_| rng.gen()).collect()
}

fn create_index(bucket_capacity: usize) -> ExtendibleHash {
    ExtendibleHash::with_config(ExtendibleHashConfig {
        bucket_capacity,
        record_stats: false,
        ..Default::default()
    })
    .unwrap()
}

/// 插入操作基准测试
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Insert");

    for &count in ITEM_COUNTS.iter() {
        let values = generate_values(count);
        group.throughput(Throughput::Elements(count as u64));

        for &capacity in BUCKET_CAPACITIES.iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("capacity_{}", capacity), count),
                &values,
                |b, values| {
                    b.iter_batched(
                        || create_index(capacity),
                        |mut index| {
                            batch_insert(&mut index, values.iter().copied());
                            index
                        },
                        criterion::BatchSize::LargeInput,
                    );
                },
            );
        }
    }
    group.finish();
}

/// 查询操作基准测试
fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("Contains");

    for &count in ITEM_COUNTS.iter() {
        let values = generate_values(count);
        let mut index = create_index(16);
        batch_insert(&mut index, values.iter().copied());

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &values, |b, values| {
            b.iter(|| values.iter().filter(|&&v| index.contains(v)).count());
        });
    }
    group.finish();
}

/// 删除操作基准测试
fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("Delete");

    for &count in ITEM_COUNTS.iter() {
        let values = generate_values(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &values, |b, values| {
            b.iter_batched(
                || {
                    let mut index = create_index(16);
                    batch_insert(&mut index, values.iter().copied());
                    index
                },
                |mut index| {
                    for &v in values {
                        index.delete(v);
                    }
                    index
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_contains, bench_delete);
criterion_main!(benches);
