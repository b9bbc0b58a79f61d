//! Path validation benchmarks for inbox-core.
//!
//! Measures the cost of the checks every store and delete item goes
//! through:
//! - Path guard on accepted and rejected paths
//! - Pre-sanitization
//! - Trash collision resolution

#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use inbox_core::StorageRoot;
use inbox_core::security::path_guard;
use inbox_core::security::sanitize_name;
use inbox_core::storage::trash::resolve_collision;
use inbox_core::types::SafeRelativePath;
use std::collections::HashSet;
use std::hint::black_box;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// Path guard benchmarks.
fn benchmark_path_guard(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_guard");

    let temp = TempDir::new().unwrap();
    let root = temp.path();

    // Simple path (most common case)
    group.bench_function("simple_accepted", |b| {
        b.iter(|| path_guard::validate(black_box("notes/today.md"), black_box(root)));
    });

    // Deep path
    group.bench_function("deep_accepted", |b| {
        b.iter(|| path_guard::validate(black_box("a/b/c/d/e/f/g/h/i/j/note.md"), black_box(root)));
    });

    // Existing parent directory (ancestor canonicalization hits disk)
    std::fs::create_dir_all(root.join("journal/2024")).unwrap();
    group.bench_function("existing_parent", |b| {
        b.iter(|| path_guard::validate(black_box("journal/2024/may.md"), black_box(root)));
    });

    group.bench_function("traversal_rejected", |b| {
        b.iter(|| path_guard::validate(black_box("../../etc/passwd"), black_box(root)));
    });

    group.bench_function("trash_rejected", |b| {
        b.iter(|| path_guard::validate(black_box("inbox/.trash/note.md"), black_box(root)));
    });

    // Denylist pass alone, no filesystem access
    group.bench_function("denylist_only", |b| {
        b.iter(|| path_guard::passes_denylist(black_box("a/b/c/d/e/f/g/h/i/j/note.md")));
    });

    group.finish();
}

/// Sanitize then validate, as every batch item does.
fn benchmark_request_item(c: &mut Criterion) {
    let mut group = c.benchmark_group("request_item");

    let temp = TempDir::new().unwrap();
    let root = StorageRoot::new(temp.path()).unwrap();

    group.bench_function("sanitize_hostile", |b| {
        b.iter(|| sanitize_name(black_box("./../..\\a/../../b/../c.md")));
    });

    group.bench_function("sanitize_and_validate", |b| {
        b.iter(|| {
            let clean = sanitize_name(black_box("./inbox/../today.md"));
            SafeRelativePath::validate(&clean, black_box(&root))
        });
    });

    group.finish();
}

/// Trash collision resolution with many occupied names.
fn benchmark_collision(c: &mut Criterion) {
    let mut group = c.benchmark_group("trash_collision");

    for occupied_count in [1usize, 10, 100] {
        let mut occupied: HashSet<PathBuf> = HashSet::new();
        occupied.insert(PathBuf::from("/r/.trash/note.md"));
        for n in 1..occupied_count {
            occupied.insert(PathBuf::from(format!("/r/.trash/note-{n}.md")));
        }

        group.bench_function(format!("occupied_{occupied_count}"), |b| {
            b.iter(|| {
                resolve_collision(black_box(Path::new("/r/.trash/note.md")), |candidate| {
                    occupied.contains(candidate)
                })
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_path_guard,
    benchmark_request_item,
    benchmark_collision
);
criterion_main!(benches);
