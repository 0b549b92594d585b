//! Benchmarks for compression throughput.
//!
//! Measures flat trees of many small files and a single large file, which
//! stress per-entry overhead and the streaming copy respectively.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::uninlined_format_args,
    clippy::cast_possible_truncation
)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::fs;
use std::hint::black_box;
use std::path::PathBuf;
use tempfile::TempDir;
use zipdir_core::ArchiveConfig;
use zipdir_core::Archiver;
use zipdir_core::walker::list_regular_files;

/// Creates a directory with `file_count` files of 1 KB each.
fn create_flat_tree(temp: &TempDir, file_count: usize) -> PathBuf {
    let dir = temp.path().join(format!("flat_{file_count}"));
    fs::create_dir_all(&dir).unwrap();

    let content = "x".repeat(1024);
    for i in 0..file_count {
        fs::write(dir.join(format!("file_{:05}.txt", i)), &content).unwrap();
    }
    dir
}

/// Creates a directory holding one file of `size` bytes.
fn create_large_file(temp: &TempDir, size: usize) -> PathBuf {
    let dir = temp.path().join(format!("large_{size}"));
    fs::create_dir_all(&dir).unwrap();

    let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
    fs::write(dir.join("blob.bin"), data).unwrap();
    dir
}

fn bench_many_small_files(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_small_files");
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let archiver = Archiver::new(ArchiveConfig::default().with_output_dir(out.path()));

    for count in [10, 100, 1000] {
        let dir = create_flat_tree(&temp, count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &dir, |b, dir| {
            b.iter(|| black_box(archiver.compress(dir).unwrap()));
        });
    }

    group.finish();
}

fn bench_large_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_file");
    group.sample_size(10);
    let temp = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let archiver = Archiver::new(ArchiveConfig::default().with_output_dir(out.path()));

    for size in [1024 * 1024, 16 * 1024 * 1024] {
        let dir = create_large_file(&temp, size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &dir, |b, dir| {
            b.iter(|| black_box(archiver.compress(dir).unwrap()));
        });
    }

    group.finish();
}

fn bench_discovery(c: &mut Criterion) {
    let temp = TempDir::new().unwrap();
    let dir = create_flat_tree(&temp, 1000);
    let config = ArchiveConfig::default();

    c.bench_function("discovery_1000_files", |b| {
        b.iter(|| black_box(list_regular_files(&dir, &config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_many_small_files,
    bench_large_file,
    bench_discovery
);
criterion_main!(benches);
