//! Criterion benchmarks for mulog

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mulog::core::{Content, Normalizer};
use mulog::prelude::*;
use serde_json::json;
use std::io;

fn quiet_logger(verbosity: usize) -> Logger {
    Logger::builder()
        .config(Config::default().with_console_verbosity(verbosity))
        .console(ConsoleSink::with_writers(io::sink(), io::sink()))
        .args(Vec::<String>::new())
        .build()
        .expect("Failed to build logger")
}

// ============================================================================
// Derivation Benchmarks
// ============================================================================

fn bench_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("derivation");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger(7);
    let root = logger.root();

    group.bench_function("tag", |b| {
        b.iter(|| black_box(root.tag(black_box("server"))));
    });

    group.bench_function("at", |b| {
        b.iter(|| black_box(root.at(black_box("warn")).unwrap()));
    });

    group.bench_function("tag_chain_4", |b| {
        b.iter(|| black_box(root.tag("a").tag("b").tag("c").tag("d")));
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger(7);
    let server = logger.tag("server");

    group.bench_function("info_text", |b| {
        b.iter(|| {
            server.info(black_box("Now listening on localhost:8000"));
        });
    });

    group.bench_function("info_value", |b| {
        b.iter(|| {
            server.info(black_box(json!({"port": 8000, "host": "localhost"})));
        });
    });

    group.bench_function("timer", |b| {
        let timed = server.timer();
        b.iter(|| {
            timed.info(black_box("step"));
        });
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = quiet_logger(1);
    let root = logger.root();

    group.bench_function("filtered_debug", |b| {
        b.iter(|| {
            root.debug(black_box("not shown"));
        });
    });

    group.bench_function("passed_error", |b| {
        b.iter(|| {
            root.error(black_box("shown"));
        });
    });

    group.finish();
}

// ============================================================================
// Formatting Benchmarks
// ============================================================================

fn bench_formatting(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatting");
    group.throughput(Throughput::Elements(1));

    let style = Style::default_style();
    let level = style.resolve("info").unwrap().clone();
    let formatter = Formatter::new(ConsoleConfig::default());
    let message = Message::new("info", 4, Content::new("lorem ipsum dolor sit amet ".repeat(8)))
        .with_tags(vec!["server".to_string(), "api".to_string()])
        .with_call_site(Some("main.rs:12:5".to_string()));

    group.bench_function("terminal_wrapped", |b| {
        b.iter(|| black_box(formatter.format(&message, &level, Target::Terminal { width: 100 })));
    });

    group.bench_function("plain", |b| {
        b.iter(|| black_box(formatter.format(&message, &level, Target::Plain)));
    });

    let normalizer = Normalizer::default();
    group.bench_function("normalize_nested_value", |b| {
        b.iter(|| {
            black_box(normalizer.normalize(vec![Arg::from(json!({
                "user": {"id": 42, "roles": ["admin", "dev"]},
                "active": true,
            }))]))
        });
    });

    group.bench_function("log_record_json", |b| {
        b.iter(|| black_box(LogRecord::from_message(&message).to_json().unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_derivation,
    bench_logging,
    bench_level_filtering,
    bench_formatting,
);

criterion_main!(benches);
