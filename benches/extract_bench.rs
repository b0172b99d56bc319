use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use dcharvest::pipelines::classification::{flatten, partition};
use dcharvest::pipelines::Extraction;

const RECORDS_PER_LINE: usize = 20;

// bench protocol:
//
// Synthetic SQL-like lines holding RECORDS_PER_LINE records each,
// one duplicate out of four records.
fn dump(nb_lines: usize) -> Vec<String> {
    (0..nb_lines)
        .map(|line| {
            let records: Vec<String> = (0..RECORDS_PER_LINE)
                .map(|r| {
                    let id = (line * RECORDS_PER_LINE + r) / 4 * 3 + r % 4;
                    format!(
                        "('<record><header><setSpec>set{}</setSpec></header><metadata>\
                         <dc:title xml:lang=\"en\">Title number {id} &amp; more</dc:title>\
                         <dc:creator>Doe, J.</dc:creator><dc:date>20{:02}-01-01</dc:date>\
                         <dc:description>A fairly long description of article {id}.</dc:description>\
                         </metadata></record>')",
                        id % 7,
                        id % 25
                    )
                })
                .collect();
            format!("INSERT INTO records VALUES {};", records.join(","))
        })
        .collect()
}

fn extract(lines: &[String]) -> usize {
    let (aggregator, _) = Extraction::aggregate(lines.iter().cloned().map(Ok)).unwrap();
    aggregator.len()
}

fn chunk(lines: &[String], workers: usize) -> usize {
    let (aggregator, _) = Extraction::aggregate(lines.iter().cloned().map(Ok)).unwrap();
    aggregator
        .into_years()
        .map(|(_, collection)| partition(flatten(collection), workers).unwrap().len())
        .sum()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Extraction");
    for nb_lines in [100, 1000] {
        let lines = dump(nb_lines);
        group.bench_with_input(BenchmarkId::new("aggregate", nb_lines), &lines, |b, l| {
            b.iter(|| extract(black_box(l)))
        });
        group.bench_with_input(BenchmarkId::new("aggregate+chunk", nb_lines), &lines, |b, l| {
            b.iter(|| chunk(black_box(l), 15))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_extraction);
criterion_main!(benches);
