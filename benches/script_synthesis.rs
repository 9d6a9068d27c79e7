use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use loginprobe::infrastructure::random::SeededRandom;
use loginprobe::{generate_automation_script, AnalysisOrchestrator, PatternRegistry};

fn orchestrator() -> AnalysisOrchestrator {
    AnalysisOrchestrator::new(PatternRegistry::builtin(), Arc::new(SeededRandom::new(7)))
}

fn bench_analyze(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let orchestrator = orchestrator();

    let mut group = c.benchmark_group("analyze");
    group.bench_function("registry_hit", |b| {
        b.to_async(&runtime)
            .iter(|| orchestrator.analyze(black_box("https://github.com/login")));
    });
    group.bench_function("generic_fallback", |b| {
        b.to_async(&runtime)
            .iter(|| orchestrator.analyze(black_box("https://unknown-startup.example/login")));
    });
    group.finish();
}

fn bench_synthesize(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("runtime");
    let result = runtime.block_on(orchestrator().analyze("https://notion.so/login"));

    c.bench_function("generate_automation_script", |b| {
        b.iter(|| generate_automation_script(black_box(&result)));
    });
}

criterion_group!(benches, bench_analyze, bench_synthesize);
criterion_main!(benches);
