//! Descriptor parsing, generation and emission benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fluentgen_bench::sample_descriptor;
use fluentgen_codegen::{GeneratorConfig, Generator, VariantKind, emit_unit};
use fluentgen_model::{DeclarationIndex, load_units};
use std::hint::black_box;

fn benchmark_load(c: &mut Criterion) {
    let xml = sample_descriptor(50, 20);

    c.bench_function("load_units_50x20", |b| {
        b.iter(|| load_units(black_box(&xml)))
    });
}

fn benchmark_generate(c: &mut Criterion) {
    let units = load_units(&sample_descriptor(50, 20)).expect("valid descriptor");
    let index = DeclarationIndex::from_units(&units);
    let config = GeneratorConfig::default();

    let mut group = c.benchmark_group("generate");
    for variant in VariantKind::ALL {
        let generator = Generator::new(&config, &index, variant);
        group.bench_with_input(BenchmarkId::from_parameter(variant), &units, |b, units| {
            b.iter(|| {
                for unit in units {
                    black_box(generator.generate(unit));
                }
            })
        });
    }
    group.finish();
}

fn benchmark_emit(c: &mut Criterion) {
    let units = load_units(&sample_descriptor(1, 100)).expect("valid descriptor");
    let index = DeclarationIndex::from_units(&units);
    let config = GeneratorConfig::default();
    let generated = Generator::new(&config, &index, VariantKind::Interface)
        .generate(&units[0])
        .into_unit()
        .expect("generated unit");

    c.bench_function("emit_interface_100_methods", |b| {
        b.iter(|| emit_unit(black_box(&generated), config.indent()))
    });
}

criterion_group!(
    benches,
    benchmark_load,
    benchmark_generate,
    benchmark_emit
);
criterion_main!(benches);
