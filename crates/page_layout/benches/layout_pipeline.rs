//! Criterion benchmarks for full versus cached layout passes.
//!
//! A synthetic page of flex rows is built directly through the document
//! API, then measured:
//! - Full passes after every row is restyled.
//! - Passes answered entirely from the cache.
//! - Parallel passes over independent documents.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use css_archetypes::{ClassRules, parse_style_block};
use node_table::{Atom, NodeId, NodeKind};
use page_layout::{Document, EngineConfig, layout_all};

/// Build `rows` flex rows of four cells each under one block root.
fn build_page(rows: usize) -> (Document, Vec<NodeId>, [Atom; 3]) {
    let (Some(row), Some(cell), Some(wide)) = (Atom::from_raw(1), Atom::from_raw(2), Atom::from_raw(3))
    else {
        return (Document::default(), Vec::new(), [Atom::MAX; 3]);
    };
    let mut rules = ClassRules::new();
    rules.insert(row, parse_style_block("display: flex; column-gap: 4px; padding: 2px"));
    rules.insert(cell, parse_style_block("flex: 1; height: 18px"));
    rules.insert(wide, parse_style_block("flex-grow: 2"));

    let mut document = Document::with_rules(EngineConfig::default(), rules);
    let root = document.add_node(NodeKind::Element, None, None, None);
    let mut row_ids = Vec::with_capacity(rows);
    for _ in 0..rows {
        let row_id = document.add_node(NodeKind::Element, None, None, Some(root));
        document.assign_classes(row_id, &[row]);
        for _ in 0..4 {
            let cell_id = document.add_node(NodeKind::Element, None, None, Some(row_id));
            document.assign_classes(cell_id, &[cell]);
        }
        row_ids.push(row_id);
    }
    (document, row_ids, [row, cell, wide])
}

fn bench_passes(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("layout_pipeline");
    for rows in [100, 1_000] {
        let (mut document, row_ids, [row, _, wide]) = build_page(rows);
        document.layout();
        let mut toggle = false;
        group.bench_with_input(BenchmarkId::new("full_pass", rows), &rows, |bench, _| {
            bench.iter(|| {
                toggle = !toggle;
                let classes = if toggle { vec![row, wide] } else { vec![row] };
                for row_id in &row_ids {
                    document.restyle(*row_id, &classes);
                }
                black_box(document.layout());
            });
        });
        group.bench_with_input(BenchmarkId::new("cached_pass", rows), &rows, |bench, _| {
            bench.iter(|| black_box(document.layout()));
        });
    }
    group.finish();
}

fn bench_parallel(criterion: &mut Criterion) {
    criterion.bench_function("layout_all_8x200", |bench| {
        bench.iter(|| {
            let mut documents: Vec<Document> = (0..8).map(|_| build_page(200).0).collect();
            black_box(layout_all(&mut documents));
        });
    });
}

criterion_group!(pipeline_benches, bench_passes, bench_parallel);
criterion_main!(pipeline_benches);
