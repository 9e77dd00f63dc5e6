//! Benchmarks for relname-parser.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use relname_parser::{parse, parse_type, Parser, ParserConfig};

const VIDEO_SAMPLES: &[&str] = &[
    "The.Matrix.1999.1080p.BluRay.x264-GRPNAME",
    "Inception.2010.2160p.UHD.BluRay.x265.HDR.DTS-HD.MA.5.1-GRPNAME",
    "Show.S01E02.720p.HDTV.x264-GRPNAME",
    "Show.S01E01-E03.1080p.WEB-DL.DDP5.1.H.264-GRPNAME",
    "[Group] Anime Title - 24 (1080p) [ABCD1234].mkv",
];

const OTHER_SAMPLES: &[&str] = &[
    "Artist-Album-2004-FLAC-GRPNAME",
    "Various_Artists-Compilation-(WEB)-2019-320-GRPNAME",
    "Some.App.v1.2.3.Incl.Keygen-GRPNAME",
    "Mag.June.2015.PDF-GRPNAME",
    "Author.Name.-.Book.Title.2019.RETAIL.EPUB.eBook-GRPNAME",
];

fn bench_parse_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_single");

    group.bench_function("movie", |b| {
        b.iter(|| parse(black_box("The.Matrix.1999.1080p.BluRay.x264-GRPNAME")))
    });

    group.bench_function("episode", |b| {
        b.iter(|| parse(black_box("Show.S01E02.720p.HDTV.x264-GRPNAME")))
    });

    group.bench_function("music", |b| {
        b.iter(|| parse(black_box("Artist-Album-2004-FLAC-GRPNAME")))
    });

    group.bench_function("type_only", |b| {
        b.iter(|| parse_type(black_box("The.Matrix.1999.1080p.BluRay.x264-GRPNAME")))
    });

    group.finish();
}

fn bench_parse_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_batch");
    let parser = Parser::new(ParserConfig::default());

    group.throughput(Throughput::Elements(VIDEO_SAMPLES.len() as u64));
    group.bench_function("video", |b| {
        b.iter(|| {
            for sample in VIDEO_SAMPLES {
                black_box(parser.parse(black_box(sample)));
            }
        })
    });

    group.throughput(Throughput::Elements(OTHER_SAMPLES.len() as u64));
    group.bench_function("other", |b| {
        b.iter(|| {
            for sample in OTHER_SAMPLES {
                black_box(parser.parse(black_box(sample)));
            }
        })
    });

    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let parser = Parser::default();

    for input in [
        "Movie.2020.720p",
        "The.Matrix.1999.1080p.BluRay.x264-GRPNAME",
        "Some.Very.Long.Show.Name.S07E13.What.We.Are.Fighting.For.1080p.AMZN.WEB-DL.DDP5.1.H.264-GRPNAME",
    ] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(input.len()), input, |b, input| {
            b.iter(|| parser.tokenize(black_box(input)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse_single, bench_parse_batch, bench_tokenize);
criterion_main!(benches);
