use criterion::{black_box, criterion_group, criterion_main, Criterion};
use measurements_formula::{Context, Formula, Variable, DEFAULT_FORMULA};
use measurements_uom::UomCatalog;

fn sample_context() -> Context {
    let catalog = UomCatalog::standard();
    let meter = catalog.get("meter").cloned();
    Context::new()
        .with(Variable::Type, "goods")
        .with(Variable::Shape, "parallelepiped")
        .with(Variable::Length, 10.0)
        .with(Variable::LengthUom, meter.clone())
        .with(Variable::Height, 5.0)
        .with(Variable::HeightUom, meter.clone())
        .with(Variable::Width, 2.0)
        .with(Variable::WidthUom, meter)
}

fn bench_compile(c: &mut Criterion) {
    c.bench_function("compile_default_formula", |b| {
        b.iter(|| Formula::compile(black_box(DEFAULT_FORMULA)))
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let formula = Formula::compile(DEFAULT_FORMULA).expect("default formula compiles");
    let ctx = sample_context();
    c.bench_function("evaluate_default_formula", |b| {
        b.iter(|| formula.evaluate_code(black_box(&ctx)))
    });
}

criterion_group!(benches, bench_compile, bench_evaluate);
criterion_main!(benches);
