//! Component benchmarks: binomial, enumeration and full grouping.

mod common;

use common::criterion_config::default_criterion;

use elephant_groups::batch::compute_many;
use elephant_groups::combinatorics::binomial;
use elephant_groups::encoding::encodings;
use elephant_groups::{compute_groups, GroupAssigner, Parallelism};

use criterion::{black_box, criterion_group, BenchmarkId, Criterion, Throughput};

fn bench_binomial(c: &mut Criterion) {
	let mut group = c.benchmark_group("component/binomial");

	for n in [16i64, 64, 128] {
		group.bench_with_input(BenchmarkId::new("central", n), &n, |b, &n| {
			b.iter(|| binomial(black_box(n), black_box(n / 2)))
		});
	}

	group.finish();
}

fn bench_encodings(c: &mut Criterion) {
	let mut group = c.benchmark_group("component/encodings");

	for len in [8u32, 12, 16, 20] {
		let weight = len / 2;
		let count = encodings(len, weight).count() as u64;
		group.throughput(Throughput::Elements(count));
		group.bench_with_input(BenchmarkId::new("central", len), &len, |b, &len| {
			b.iter(|| encodings(black_box(len), black_box(len / 2)).count())
		});
	}

	group.finish();
}

fn bench_compute_groups(c: &mut Criterion) {
	let mut group = c.benchmark_group("e2e/compute_groups");

	for count in [10u64, 1_000, 100_000] {
		group.throughput(Throughput::Elements(count));
		group.bench_with_input(BenchmarkId::new("count", count), &count, |b, &count| {
			b.iter(|| {
				let result = compute_groups(black_box(count)).expect("count is valid");
				black_box(result)
			})
		});
	}

	group.finish();
}

fn bench_batch(c: &mut Criterion) {
	let assigner = GroupAssigner::default();
	let counts: Vec<u64> = (1..=2_000).collect();

	let mut group = c.benchmark_group("component/batch");
	group.throughput(Throughput::Elements(counts.len() as u64));

	for (label, parallelism) in [
		("sequential", Parallelism::Sequential),
		("parallel", Parallelism::Parallel),
	] {
		group.bench_function(label, |b| {
			b.iter(|| black_box(compute_many(&assigner, black_box(counts.as_slice()), parallelism)))
		});
	}

	group.finish();
}

criterion_group! {
	name = benches;
	config = default_criterion();
	targets = bench_binomial, bench_encodings, bench_compute_groups, bench_batch
}
criterion::criterion_main!(benches);
