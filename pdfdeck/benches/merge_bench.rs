//! Performance benchmarks for pdfdeck.
//!
//! Run with: cargo bench
//!
//! Inputs are generated in memory, so no fixtures are needed.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lopdf::{Document, Object, dictionary};
use pdfdeck::config::CompressionLevel;
use pdfdeck::files::FileEntry;
use pdfdeck::list::{Direction, OrderedFileList};
use pdfdeck::merge::{LopdfMerger, MergeSource, PdfMerger};
use pdfdeck::preview::render_pages_in_order;
use pdfdeck::render::{FrameRenderer, PageRenderer};
use std::sync::Arc;

/// Build a PDF with `pages` empty A4 pages.
fn sample_pdf(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let catalog_id = doc.new_object_id();
    let pages_id = doc.new_object_id();

    let kids: Vec<Object> = (0..pages)
        .map(|_| {
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            })
            .into()
        })
        .collect();

    doc.objects.insert(
        pages_id,
        dictionary! { "Type" => "Pages", "Kids" => kids, "Count" => pages as i64 }.into(),
    );
    doc.objects.insert(
        catalog_id,
        dictionary! { "Type" => "Catalog", "Pages" => pages_id }.into(),
    );
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn sources(files: usize, pages: usize) -> Vec<MergeSource> {
    let bytes = sample_pdf(pages);
    (0..files)
        .map(|i| MergeSource::from(&FileEntry::new(format!("{i}.pdf"), bytes.clone())))
        .collect()
}

/// Benchmark: Merge an increasing number of files
fn bench_merge_file_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_file_count");
    let merger = LopdfMerger::new();

    for files in [2, 5, 10, 20] {
        let input = sources(files, 4);
        group.bench_with_input(BenchmarkId::from_parameter(files), &input, |b, input| {
            b.iter(|| merger.merge_blocking(black_box(input)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: Merge with each compression level
fn bench_compression_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_levels");
    let input = sources(5, 10);

    for (name, level) in [
        ("none", CompressionLevel::None),
        ("standard", CompressionLevel::Standard),
        ("maximum", CompressionLevel::Maximum),
    ] {
        let merger = LopdfMerger::with_compression(level);
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| merger.merge_blocking(black_box(input)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark: Merge through the async interface
fn bench_async_merge(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let merger = LopdfMerger::new();
    let input = sources(5, 4);

    c.bench_function("async_merge_5_files", |b| {
        b.to_async(&rt)
            .iter(|| async { merger.merge(black_box(input.clone())).await.unwrap() });
    });
}

/// Benchmark: Render a merged document preview
fn bench_preview(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let renderer: Arc<dyn PageRenderer> = Arc::new(FrameRenderer::new());
    let merged = LopdfMerger::new().merge_blocking(&sources(4, 5)).unwrap();
    let bytes = merged.shared_bytes();

    let mut group = c.benchmark_group("preview_jobs");
    for jobs in [1, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(jobs), &jobs, |b, &jobs| {
            b.to_async(&rt).iter(|| {
                render_pages_in_order(Arc::clone(&renderer), Arc::clone(&bytes), 0.2, jobs)
            });
        });
    }
    group.finish();
}

/// Benchmark: Walk one row from the bottom of a long list to the top
fn bench_reorder(c: &mut Criterion) {
    let files: Vec<FileEntry> = (0..500)
        .map(|i| FileEntry::new(format!("{i}.pdf"), Vec::<u8>::new()))
        .collect();

    c.bench_function("move_one_500_steps", |b| {
        b.iter(|| {
            let mut list = OrderedFileList::default();
            list.load_selection(files.clone());
            let last = list.get(499).unwrap().id();
            while list.move_one(black_box(last), Direction::Up) {}
            list
        });
    });
}

criterion_group!(
    benches,
    bench_merge_file_count,
    bench_compression_levels,
    bench_async_merge,
    bench_preview,
    bench_reorder
);
criterion_main!(benches);
