//! Performance benchmarks for row and list rendering
//!
//! Measures the record/replay cost of a single animated row and a full
//! message list frame at different list sizes.
//! Run with: cargo bench

use std::sync::Arc;
use std::time::Instant;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ratatui::buffer::Buffer;
use ratatui::layout::{Rect, Size};
use ratatui::style::Style;
use twig::models::{MessageId, MessageRecord};
use twig::navigation::{View, ViewFrame};
use twig::render::{Bounds, HitRegistry, RowRecording};
use twig::services::{MemorySource, MessageSource};
use twig::ui::{render_row, RowArena, RowConfig, Theme};
use twig::views::RepliesView;

/// Generate a thread of `count` messages where every third one is a reply.
fn generate_records(count: usize) -> Vec<MessageRecord> {
    let mut records: Vec<MessageRecord> = Vec::with_capacity(count);
    for i in 0..count {
        let content = format!(
            "Message {} with enough text to wrap over a couple of lines in a narrow terminal",
            i
        );
        let mut record = MessageRecord::new(format!("user{}", i % 7), content)
            .with_id(MessageId::new(format!("m{}", i)));
        if i % 3 == 2 {
            let parent = records[i - 1].id.clone();
            record = record.replying_to(&parent);
        }
        records.push(record);
    }
    records
}

fn draw_lines(buf: &mut Buffer, area: Rect) -> Size {
    for row in 0..area.height.min(3) {
        buf.set_stringn(
            area.x,
            area.y + row,
            "the quick brown fox jumps over the lazy dog",
            usize::from(area.width),
            Style::default(),
        );
    }
    Size::new(area.width.min(43), area.height.min(3))
}

/// Benchmark recording a row offscreen and replaying it at an offset
fn bench_row_record_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_record_replay");

    for width in [40u16, 80, 160] {
        let area = Rect::new(0, 0, width, 3);
        group.bench_with_input(BenchmarkId::from_parameter(width), &area, |b, area| {
            let mut target = Buffer::empty(*area);
            b.iter(|| {
                let recording = RowRecording::record(area.as_size(), draw_lines);
                let bounds = Bounds::new(black_box(5), 0, recording.size());
                recording.replay(&mut target, bounds, *area);
                black_box(&target);
            })
        });
    }

    group.finish();
}

/// Benchmark a full animated row, including hit registration
fn bench_render_row(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_row");
    let area = Rect::new(0, 0, 80, 3);
    let id = MessageId::from("row");

    group.bench_function("settled", |b| {
        let mut arena = RowArena::new(RowConfig::default());
        let now = Instant::now();
        arena.ensure(&id, false, now);
        let mut buf = Buffer::empty(area);
        let mut hits = HitRegistry::new();
        b.iter(|| {
            hits.clear();
            let slot = arena.get_mut(&id).expect("slot");
            black_box(render_row(&mut buf, area, area, slot, &mut hits, now, draw_lines))
        })
    });

    group.bench_function("revealing", |b| {
        let mut arena = RowArena::new(RowConfig::default());
        let start = Instant::now();
        arena.ensure(&id, true, start);
        let mut buf = Buffer::empty(area);
        let mut hits = HitRegistry::new();
        b.iter(|| {
            hits.clear();
            let slot = arena.get_mut(&id).expect("slot");
            black_box(render_row(&mut buf, area, area, slot, &mut hits, start, draw_lines))
        })
    });

    group.finish();
}

/// Benchmark rendering one frame of the message list
fn bench_list_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_render");
    let area = Rect::new(0, 0, 100, 40);
    let theme = Theme::dark();

    for count in [10usize, 100, 1000] {
        let source: Arc<dyn MessageSource> =
            Arc::new(MemorySource::with_records(generate_records(count)));
        let mut view = RepliesView::new(source, RowConfig::default(), 100);
        view.become_visible(Instant::now());

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            let mut buf = Buffer::empty(area);
            let mut hits = HitRegistry::new();
            b.iter(|| {
                hits.clear();
                let size = view.render(&mut ViewFrame {
                    buf: &mut buf,
                    area,
                    hits: &mut hits,
                    theme: &theme,
                    now: Instant::now(),
                });
                black_box(size)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_row_record_replay,
    bench_render_row,
    bench_list_render
);

criterion_main!(benches);
