use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};
use std::hint::black_box;

use twenty48::engine::{Board, Move};

fn corpus() -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut boards = Vec::new();
    let mut board = Board::new(&mut rng);
    boards.push(board.clone());
    // Derive a variety of densities deterministically
    let seq = [Move::Left, Move::Up, Move::Right, Move::Down];
    for i in 0..40 {
        if board.apply(seq[i % seq.len()]) {
            board.add_random_tile(&mut rng);
        }
        boards.push(board.clone());
    }
    boards
}

fn bench_apply(c: &mut Criterion) {
    for dir in Move::ALL {
        c.bench_function(&format!("apply/{dir:?}"), |bch| {
            let boards = corpus();
            bch.iter(|| {
                let mut acc = 0u32;
                for board in &boards {
                    let mut b = board.clone();
                    b.apply(dir);
                    acc ^= b.tile(0, 0);
                }
                black_box(acc)
            })
        });
    }
}

fn bench_state(c: &mut Criterion) {
    c.bench_function("state/scan", |bch| {
        let boards = corpus();
        bch.iter(|| {
            let mut not_over = 0usize;
            for board in &boards {
                if board.state() == twenty48::engine::GameState::NotOver {
                    not_over += 1;
                }
            }
            black_box(not_over)
        })
    });
}

criterion_group!(benches, bench_apply, bench_state);
criterion_main!(benches);
