//! Benchmark for consolidation performance.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depworld_core::{consolidate, InputBundle, Item};

/// Synthetic bundle: every target pulls in a chain of packages, each
/// package carrying a few compile-time files.
fn synthetic_bundle(targets: usize, packages: usize, files_per_package: usize) -> InputBundle {
    let mut bundle = InputBundle::default();

    for t in 0..targets {
        bundle
            .target_definitions
            .push(Item::new(format!("net{}.0", t + 5)));
        bundle
            .target_definitions
            .push(Item::new(format!("net{}.0/linux-x64", t + 5)));
    }

    for p in 0..packages {
        let id = format!("Pkg{}/1.0.{}", p, p);
        bundle.package_definitions.push(
            Item::new(&id)
                .with_metadata("Name", format!("Pkg{}", p))
                .with_metadata("Version", format!("1.0.{}", p)),
        );
        for f in 0..files_per_package {
            bundle
                .file_definitions
                .push(Item::new(format!("lib/Pkg{}/File{}.dll", p, f)));
        }
    }

    for t in 0..targets {
        let target = format!("net{}.0", t + 5);
        for p in 0..packages {
            let parent = if p == 0 {
                String::new()
            } else {
                format!("Pkg{}/1.0.{}", p - 1, p - 1)
            };
            bundle.package_dependencies.push(
                Item::new(format!("Pkg{}/1.0.{}", p, p))
                    .with_metadata("ParentTarget", &target)
                    .with_metadata("ParentPackage", parent),
            );
            for f in 0..files_per_package {
                bundle.file_dependencies.push(
                    Item::new(format!("lib/Pkg{}/File{}.dll", p, f))
                        .with_metadata("ParentTarget", &target)
                        .with_metadata("ParentPackage", format!("Pkg{}/1.0.{}", p, p))
                        .with_metadata("FileGroup", "CompileTimeAssembly"),
                );
            }
        }
    }

    bundle
}

fn bench_consolidate_small(c: &mut Criterion) {
    let bundle = synthetic_bundle(2, 50, 2);
    c.bench_function("consolidate_2x50", |b| {
        b.iter(|| black_box(consolidate(black_box(&bundle)).records()))
    });
}

fn bench_consolidate_large(c: &mut Criterion) {
    let bundle = synthetic_bundle(4, 1000, 3);
    c.bench_function("consolidate_4x1000", |b| {
        b.iter(|| black_box(consolidate(black_box(&bundle)).records()))
    });
}

criterion_group!(benches, bench_consolidate_small, bench_consolidate_large);
criterion_main!(benches);
