mod fixtures;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::black_box;
use criterion::criterion_group;
use criterion::criterion_main;
use libgraphql_stitch::result::ResultNode;

const LIST_SIZES: [usize; 3] = [10, 100, 1_000];

// ─── Group 1: Full Conversion ────────────────────────────

fn convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for size in LIST_SIZES {
        let prepared = fixtures::renamed_issue_list(size)
            .prepare()
            .expect("benchmark stitch case prepares");
        let stitcher = prepared.stitcher();
        let correct_root = ResultNode::root().build();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(
            BenchmarkId::new("renamed_issue_list", size),
            prepared.tree(),
            |b, tree| b.iter(|| black_box(stitcher.convert(tree, &correct_root))),
        );
    }

    group.finish();
}

// ─── Group 2: Case Preparation ───────────────────────────

fn prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");

    for size in LIST_SIZES {
        let case = fixtures::renamed_issue_list(size);
        group.bench_with_input(
            BenchmarkId::new("renamed_issue_list", size),
            &case,
            |b, case| b.iter(|| black_box(case.prepare())),
        );
    }

    group.finish();
}

criterion_group!(benches, convert, prepare);
criterion_main!(benches);
