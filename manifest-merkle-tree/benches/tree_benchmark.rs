use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use manifest_merkle_tree::{ManifestEntry, MerkleTree, TreeOptions};

fn entries(count: usize) -> Vec<ManifestEntry> {
    (0..count)
        .map(|i| ManifestEntry::new(format!("{}.png", i), format!("bafkreibenchmark{}", i)))
        .collect()
}

fn bench(c: &mut Criterion) {
    {
        let mut group = c.benchmark_group("Merkle build");
        for size in [1_000usize, 10_000, 100_000] {
            let records = entries(size);
            group.bench_with_input(BenchmarkId::new("leaves", size), &records, |b, records| {
                b.iter(|| {
                    MerkleTree::from_records(black_box(records), TreeOptions::default())
                        .unwrap()
                        .expect("build")
                });
            });
        }
    }

    c.bench_function("Merkle all proofs", |b| {
        let tree = MerkleTree::from_records(&entries(10_000), TreeOptions::default())
            .unwrap()
            .expect("build");
        b.iter(|| black_box(tree.all_hex_proofs()));
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench
);
criterion_main!(benches);
