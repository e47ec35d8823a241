//! Injection benchmarks
//!
//! Measures one full injection pass per iteration for every fixture shape at
//! sizes 5 and 20, with and without dependency ordering:
//! - init_without_dependency_order
//! - init_with_dependency_order
//!
//! Each iteration gets a freshly seeded target; seeding is excluded from the
//! measurement.

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use wireup_di::{Injector, OrderingStrategy, Target};
use wireup_test::doubles::DoubleFactory;
use wireup_test::fixtures::{SUPPORTED_SIZES, Shape, fixture_catalog, seeded_target};

fn fresh_target(shape: Shape, size: usize, factory: &DoubleFactory) -> Target {
	seeded_target(shape, size, factory).expect("fixture shape and size are supported")
}

fn bench_strategy(c: &mut Criterion, strategy: OrderingStrategy, group_name: &str) {
	let injector = Injector::new(Arc::new(fixture_catalog()));
	let factory = DoubleFactory::new();
	let mut group = c.benchmark_group(group_name);

	for shape in Shape::ALL {
		for size in SUPPORTED_SIZES {
			group.bench_with_input(
				BenchmarkId::new(shape.as_str(), size),
				&(shape, size),
				|b, &(shape, size)| {
					b.iter_batched(
						|| fresh_target(shape, size, &factory),
						|mut target| {
							let report = injector
								.inject(&mut target, strategy)
								.expect("fixture targets always inject");
							black_box((report, target))
						},
						BatchSize::SmallInput,
					);
				},
			);
		}
	}

	group.finish();
}

fn benchmark_without_dependency_order(c: &mut Criterion) {
	bench_strategy(
		c,
		OrderingStrategy::DeclarationOrder,
		"init_without_dependency_order",
	);
}

fn benchmark_with_dependency_order(c: &mut Criterion) {
	bench_strategy(
		c,
		OrderingStrategy::DependencyOrder,
		"init_with_dependency_order",
	);
}

fn benchmark_graph_planning(c: &mut Criterion) {
	let catalog = fixture_catalog();
	let factory = DoubleFactory::new();
	let mut group = c.benchmark_group("dependency_order_plan");

	for shape in Shape::ALL {
		let target = fresh_target(shape, 20, &factory);
		group.bench_function(shape.as_str(), |b| {
			b.iter(|| {
				black_box(
					OrderingStrategy::DependencyOrder
						.plan(black_box(&target), &catalog)
						.expect("fixture targets are acyclic"),
				)
			});
		});
	}

	group.finish();
}

criterion_group!(
	benches,
	benchmark_without_dependency_order,
	benchmark_with_dependency_order,
	benchmark_graph_planning
);
criterion_main!(benches);
