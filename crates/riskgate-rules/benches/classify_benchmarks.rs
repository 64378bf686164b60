//! Classification latency benchmarks
//!
//! Run with: cargo bench -p riskgate-rules

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use riskgate_core::{ClassificationInput, ContentMedium, HighRiskDomain};
use riskgate_rules::classify;

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2027, 9, 1).unwrap()
}

fn scenarios() -> Vec<(&'static str, ClassificationInput)> {
    let base = ClassificationInput::new("Bench", "Bench GmbH", "Benchmark system")
        .with_reference_date(reference_date());

    vec![
        ("minimal", base.clone()),
        (
            "prohibited",
            ClassificationInput {
                performs_social_scoring: true,
                uses_subliminal_manipulation: true,
                ..base.clone()
            },
        ),
        (
            "annex_i_product",
            ClassificationInput {
                is_safety_component_annex_i: true,
                requires_third_party_assessment: true,
                interacts_with_humans: true,
                ..base.clone()
            },
        ),
        (
            "annex_iii_exempted",
            ClassificationInput {
                narrow_procedural_task: true,
                detects_patterns_only: true,
                ..base.clone().with_domain(HighRiskDomain::Employment, Some("Aufgabenzuweisung"))
            },
        ),
        (
            "transparency_all_media",
            ClassificationInput {
                interacts_with_humans: true,
                generates_synthetic_content: true,
                generates_deepfakes: true,
                synthetic_content_types: ContentMedium::ALL.into_iter().collect(),
                ..base.clone()
            },
        ),
        ("gpai_systemic", base.with_gpai(true)),
    ]
}

fn benchmark_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    group.sample_size(200);

    for (name, input) in scenarios() {
        group.bench_with_input(BenchmarkId::new("tier", name), &input, |b, input| {
            b.iter(|| classify(black_box(input)));
        });
    }

    group.finish();
}

fn benchmark_serialize_result(c: &mut Criterion) {
    let input = ClassificationInput {
        interacts_with_humans: true,
        ..ClassificationInput::new("Bench", "Bench GmbH", "Benchmark system")
            .with_reference_date(reference_date())
    };
    let result = classify(&input);

    c.bench_function("serialize_result_json", |b| {
        b.iter(|| serde_json::to_string(black_box(&result)).unwrap());
    });
}

criterion_group!(benches, benchmark_classify, benchmark_serialize_result);
criterion_main!(benches);
