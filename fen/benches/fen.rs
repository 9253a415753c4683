use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fen_notation::{validate, FenPosition};

const FENS: [(&str, &str); 6] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "enpassant",
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
    ),
    ("empty", "8/8/8/8/8/8/8/8 w - - 0 1"),
    (
        "bad_row",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1",
    ),
];

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    for (name, fen) in FENS {
        group.bench_function(name, |b| b.iter(|| validate(black_box(fen))));
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for (name, fen) in FENS {
        group.bench_function(name, |b| {
            b.iter(|| FenPosition::from_fen(black_box(fen)).is_ok())
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    for (name, fen) in FENS {
        let pos = match FenPosition::from_fen(fen) {
            Ok(pos) => pos,
            Err(_) => continue,
        };
        group.bench_function(name, |b| b.iter(|| black_box(&pos).as_fen()));
    }
    group.finish();
}

criterion_group!(benches, bench_validate, bench_parse, bench_format);
criterion_main!(benches);
