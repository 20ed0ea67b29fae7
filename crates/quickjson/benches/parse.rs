#![allow(missing_docs)]
//! Whole-document parse of generated datasets, in memory and through the
//! chunked reader, next to `serde_json` as a baseline.

use std::{fmt::Write, hint::black_box, io::Cursor, time::Duration};

use criterion::{
    BenchmarkGroup, Criterion, Throughput, criterion_group, criterion_main, measurement::WallTime,
};
use quickjson::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_TOKEN_SIZE, ParserOptions, parse_reader, parse_str};
use serde_json::Value as SerdeValue;

struct Dataset {
    name: &'static str,
    build: fn() -> String,
}

fn ints_array() -> String {
    let items: Vec<String> = (0..10_000i64).map(|i| (i * 7_919 - 35_000).to_string()).collect();
    format!("[{}]", items.join(","))
}

fn floats_array() -> String {
    let items: Vec<String> = (0..10_000).map(|i| format!("{:?}", f64::from(i) / 7.0)).collect();
    format!("[{}]", items.join(","))
}

fn bigints_array() -> String {
    let items: Vec<String> = (0..2_000u64)
        .map(|i| format!("{}{:020}", u64::MAX - i, i))
        .collect();
    format!("[{}]", items.join(","))
}

fn string_array() -> String {
    let items: Vec<String> = (0..5_000)
        .map(|i| format!("\"entry {i} with \\\"escapes\\\" and caf\\u00e9\""))
        .collect();
    format!("[{}]", items.join(","))
}

fn records() -> String {
    let mut out = String::from("[");
    for i in 0..2_000 {
        if i > 0 {
            out.push(',');
        }
        write!(
            out,
            r#"{{"id":{i},"name":"user{i}","active":{},"score":{}.5,"tags":["a","b"],"parent":null}}"#,
            i % 2 == 0,
            i % 100
        )
        .unwrap();
    }
    out.push(']');
    out
}

fn deep_nesting() -> String {
    let mut out = String::new();
    for _ in 0..60 {
        out.push_str(r#"{"k":["#);
    }
    for _ in 0..60 {
        out.push_str("]}");
    }
    out
}

fn bench_dataset(dataset: &Dataset, c: &mut Criterion) {
    let json = (dataset.build)();
    let mut group = c.benchmark_group(dataset.name);
    group.throughput(Throughput::Bytes(json.len() as u64));
    group.measurement_time(Duration::from_secs(3));

    in_memory(&json, &mut group);
    chunked(&json, &mut group);
    serde_value(&json, &mut group);
    group.finish();
}

fn in_memory(json: &str, group: &mut BenchmarkGroup<'_, WallTime>) {
    group.bench_function("quickjson_str", |b| {
        b.iter(|| {
            let v = parse_str(black_box(json), ParserOptions::default()).unwrap();
            black_box(v)
        });
    });
}

fn chunked(json: &str, group: &mut BenchmarkGroup<'_, WallTime>) {
    group.bench_function("quickjson_reader", |b| {
        b.iter(|| {
            let v = parse_reader(
                Cursor::new(black_box(json.as_bytes())),
                ParserOptions::default(),
                DEFAULT_CHUNK_SIZE,
                DEFAULT_MAX_TOKEN_SIZE,
            )
            .unwrap();
            black_box(v)
        });
    });
}

fn serde_value(json: &str, group: &mut BenchmarkGroup<'_, WallTime>) {
    group.bench_function("serde_value", |b| {
        b.iter(|| {
            let v: SerdeValue = serde_json::from_str(black_box(json)).unwrap();
            black_box(v)
        });
    });
}

fn parse_benches(c: &mut Criterion) {
    let datasets = [
        Dataset {
            name: "ints_array",
            build: ints_array,
        },
        Dataset {
            name: "floats_array",
            build: floats_array,
        },
        Dataset {
            name: "bigints_array",
            build: bigints_array,
        },
        Dataset {
            name: "string_array",
            build: string_array,
        },
        Dataset {
            name: "records",
            build: records,
        },
        Dataset {
            name: "deep_nesting",
            build: deep_nesting,
        },
    ];

    for dataset in &datasets {
        bench_dataset(dataset, c);
    }
}

criterion_group!(benches, parse_benches);
criterion_main!(benches);
