use brewlog::models::{normalize_coffee_name, BrewForm};
use brewlog::validation::validate_brew_form;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn benchmark_validation(c: &mut Criterion) {
    let valid = BrewForm {
        brew_method: "V60".to_string(),
        coffee: "Ethiopia Guji Natural".to_string(),
        coffee_amount: "18".to_string(),
        grind_setting: "24".to_string(),
        water_amount: "300".to_string(),
        temperature: "94".to_string(),
        brew_time: "180".to_string(),
        notes: "floral, long finish".to_string(),
        tags: vec!["pourover".to_string()],
        rating: 4,
    };

    // Every field invalid forces the full error-collection path
    let invalid = BrewForm {
        brew_method: String::new(),
        coffee: "x".repeat(150),
        coffee_amount: "not a number".to_string(),
        grind_setting: "-1".to_string(),
        water_amount: "9999".to_string(),
        temperature: "boiling".to_string(),
        brew_time: "0".to_string(),
        notes: String::new(),
        tags: Vec::new(),
        rating: 9,
    };

    let mut group = c.benchmark_group("brew_form");

    group.bench_function("validate_valid_form", |b| {
        b.iter(|| validate_brew_form(black_box(&valid)))
    });

    group.bench_function("validate_invalid_form", |b| {
        b.iter(|| validate_brew_form(black_box(&invalid)))
    });

    group.finish();
}

fn benchmark_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("coffee_name");

    group.bench_function("normalize_simple", |b| {
        b.iter(|| normalize_coffee_name(black_box("Ethiopia Guji")))
    });

    group.bench_function("normalize_messy", |b| {
        b.iter(|| {
            normalize_coffee_name(black_box(
                "  Lot #42 — Finca El Paraíso (Double Anaerobic!!)   Washed  ",
            ))
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_validation, benchmark_normalization);
criterion_main!(benches);
