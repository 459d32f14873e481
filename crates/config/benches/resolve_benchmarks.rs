//! Benchmarks for recipe resolution
//!
//! Run with: cargo bench --package resampler-config

use criterion::{criterion_group, criterion_main, Criterion};
use resampler_config::{resolve, resolve_str, select_recipe, ConfigManager, ResamplerBlock};
use std::hint::black_box;
use tempfile::TempDir;

const CUSTOM_TOML: &str = r#"[resampler]
quality = "custom"
precision = 24
phase_response = 25
passband_end = "91.3"
stopband_begin = "105"
attenuation = "3"
flags = 8
"#;

fn bench_select_recipe(c: &mut Criterion) {
    c.bench_function("select_recipe", |b| {
        b.iter(|| black_box(select_recipe(black_box(Some("custom")))));
    });
}

fn bench_resolve_preset(c: &mut Criterion) {
    let block = ResamplerBlock::new("very-high");

    c.bench_function("resolve_preset", |b| {
        b.iter(|| black_box(resolve(black_box(&block))));
    });
}

fn bench_resolve_custom(c: &mut Criterion) {
    let block = ResamplerBlock::new("custom")
        .with_precision(24)
        .with_phase_response(25)
        .with_passband_end("91.3")
        .with_stopband_begin("105")
        .with_attenuation("3")
        .with_flags(8);

    c.bench_function("resolve_custom", |b| {
        b.iter(|| black_box(resolve(black_box(&block))));
    });
}

fn bench_resolve_toml(c: &mut Criterion) {
    c.bench_function("resolve_toml", |b| {
        b.iter(|| black_box(resolve_str(black_box(CUSTOM_TOML))));
    });
}

fn bench_config_load(c: &mut Criterion) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let manager =
        ConfigManager::with_directory(temp_dir.path().to_path_buf()).expect("Failed to create manager");
    std::fs::write(manager.config_path(), CUSTOM_TOML).expect("Failed to write config");

    c.bench_function("config_load", |b| {
        b.iter(|| black_box(manager.load().expect("Failed to load")));
    });
}

criterion_group!(
    benches,
    bench_select_recipe,
    bench_resolve_preset,
    bench_resolve_custom,
    bench_resolve_toml,
    bench_config_load
);

criterion_main!(benches);
