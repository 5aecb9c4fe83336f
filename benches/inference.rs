//! Benchmarks for evaluation and grid sweeps

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzy_control::{ControlSystem, GridEvaluator, Inputs, Rules, Triangular, Universe, Variable, Variables};

fn fan_system(resolution: f64) -> (ControlSystem, Variable, Variable) {
    let mut vars = Variables::new();
    let universe = Universe::arange(0., 100. + resolution, resolution).unwrap();
    let t = vars.antecedent("temperature", universe.clone()).unwrap();
    let h = vars.antecedent("humidity", universe.clone()).unwrap();
    let f = vars.consequent("fan_speed", universe).unwrap();

    for (var, [low, mid, high]) in [
        (t, ["Cold", "Warm", "Hot"]),
        (h, ["Dry", "Comfort", "Wet"]),
        (f, ["Low", "Medium", "High"]),
    ] {
        vars.add_term(var, low, Triangular::new(0., 0., 50.).unwrap()).unwrap();
        vars.add_term(var, mid, Triangular::new(25., 50., 75.).unwrap()).unwrap();
        vars.add_term(var, high, Triangular::new(50., 100., 100.).unwrap()).unwrap();
    }

    let mut rules = Rules::new();
    let table = [
        ("Cold", "Dry", "Low"),
        ("Cold", "Comfort", "Low"),
        ("Cold", "Wet", "Medium"),
        ("Warm", "Dry", "Low"),
        ("Warm", "Comfort", "Medium"),
        ("Warm", "Wet", "High"),
        ("Hot", "Dry", "Medium"),
        ("Hot", "Comfort", "High"),
        ("Hot", "Wet", "High"),
    ];

    for (temp, humid, speed) in table {
        rules.add(t.is(temp) & h.is(humid), f.term(speed));
    }

    (ControlSystem::new(vars, rules).unwrap(), t, h)
}

fn evaluate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for resolution in [1., 0.1] {
        let (system, t, h) = fan_system(resolution);
        let inputs = Inputs::new().with(t, 30.).with(h, 70.);

        group.bench_with_input(BenchmarkId::new("fan", resolution), &inputs, |b, inputs| {
            b.iter(|| black_box(system.evaluate(inputs)))
        });

        let mut ctx = system.context();

        group.bench_with_input(BenchmarkId::new("fan_reused_context", resolution), &inputs, |b, inputs| {
            b.iter(|| black_box(system.evaluate_with(&mut ctx, inputs)))
        });
    }

    group.finish();
}

fn sweep_benchmark(c: &mut Criterion) {
    let (system, t, h) = fan_system(1.);
    let axis = Universe::arange(0., 101., 5.).unwrap().points().to_vec();
    let axes = [(t, axis.clone()), (h, axis)];

    c.bench_function("sweep_21x21", |b| {
        b.iter(|| black_box(GridEvaluator::new(&system).sweep(&axes)))
    });
}

criterion_group!(benches, evaluate_benchmark, sweep_benchmark);
criterion_main!(benches);
