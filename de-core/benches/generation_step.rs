use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use de_core::{
    Bounds, DEConfigBuilder, GenerationContext, GenerationParams, ParentSelection, Population,
    Updating, differential_evolution, evolve_generation,
};
use de_objectives::rastrigin;
use ndarray::{Array1, Array2};

fn seeded_population(npop: usize, dim: usize) -> Population {
    // Deterministic spread over [-5, 5] without touching the crate's RNG.
    let genes = Array2::from_shape_fn((npop, dim), |(i, j)| {
        let t = ((i * 31 + j * 17) % 101) as f64 / 100.0;
        -5.0 + 10.0 * t
    });
    let scores: Array1<f64> = genes
        .rows()
        .into_iter()
        .map(|row| rastrigin(&row.to_owned()))
        .collect();
    Population::from_parts(&genes, &scores)
}

fn bench_generation_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");
    let dim = 30;

    for &npop in [50usize, 200, 1000].iter() {
        for (label, parallel) in [("sequential", false), ("parallel", true)] {
            group.bench_with_input(BenchmarkId::new(label, npop), &npop, |b, &npop| {
                let pop = seeded_population(npop, dim);
                let mut generation = 0;
                b.iter(|| {
                    let ctx = GenerationContext {
                        generation,
                        params: GenerationParams {
                            crossover: 0.9,
                            mutation: 0.5,
                        },
                        bounds: Bounds { min: -5.0, max: 5.0 },
                        seed: 17,
                        parents: ParentSelection::WithReplacement,
                        updating: Updating::Immediate,
                        parallel,
                    };
                    generation += 1;
                    black_box(evolve_generation(&pop, &rastrigin, &ctx).unwrap())
                });
            });
        }
    }
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    c.bench_function("rastrigin_10d_200_generations", |b| {
        b.iter(|| {
            let config = DEConfigBuilder::new()
                .dim(10)
                .popsize(100)
                .bounds(-5.12, 5.12)
                .maxiter(200)
                .seed(42)
                .build()
                .unwrap();
            black_box(differential_evolution(&rastrigin, config).unwrap().fun)
        });
    });
}

criterion_group!(benches, bench_generation_step, bench_full_run);
criterion_main!(benches);
