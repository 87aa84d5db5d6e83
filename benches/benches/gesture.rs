// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::Point;
use smallvec::smallvec;
use understory_gesture::GestureEngine;
use understory_gesture::binding::Handlers;
use understory_gesture::input::{Contact, InputEvent, Touch};

type Engine = GestureEngine<u32, u32, ()>;

/// An engine with `elements` bound elements, each with a move and click handler.
fn engine_with(elements: u32) -> Engine {
    let mut engine = Engine::new();
    for element in 0..elements {
        engine
            .bind(
                element,
                Handlers::new()
                    .on_select(|p, _| (p.x >= 0.0).then_some(0))
                    .on_move(|action, _| black_box(action.diff()).x > 1e9)
                    .on_click(|action, _| {
                        black_box(action.total());
                    }),
            )
            .unwrap();
    }
    engine
}

fn touch(id: u64, target: u32, x: f64, y: f64) -> InputEvent<u32> {
    InputEvent::Touch(smallvec![Touch::new(id, Contact::new(target, Point::new(x, y)))])
}

fn bench_drag_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/drag");

    // One contact pressed, dragged `moves` times and released.
    for moves in [16usize, 256, 4_096] {
        let stream: Vec<InputEvent<u32>> = (0..moves)
            .map(|i| touch(1, 7, i as f64 * 0.5, 0.0))
            .collect();
        group.throughput(Throughput::Elements(moves as u64));

        group.bench_with_input(BenchmarkId::new("single", moves), &stream, |b, stream| {
            b.iter_batched(
                || engine_with(64),
                |mut engine| {
                    engine.handle_start(&touch(1, 7, 0.0, 0.0));
                    for event in stream {
                        black_box(engine.handle_move(event));
                    }
                    engine.handle_end(&touch(1, 7, 0.0, 0.0));
                    black_box(engine);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_concurrent_contacts(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/concurrent");

    // Each contact lands on its own element, so the action table holds `contacts` entries.
    for contacts in [2u64, 8, 32] {
        let down: Vec<InputEvent<u32>> = (0..contacts)
            .map(|id| touch(id, id as u32, 0.0, 0.0))
            .collect();
        let moved: Vec<InputEvent<u32>> = (0..contacts)
            .map(|id| touch(id, id as u32, 3.0, 0.0))
            .collect();
        group.throughput(Throughput::Elements(contacts));

        group.bench_with_input(
            BenchmarkId::new("tap", contacts),
            &(down, moved),
            |b, (down, moved)| {
                b.iter_batched(
                    || engine_with(contacts as u32),
                    |mut engine| {
                        for event in down {
                            engine.handle_start(event);
                        }
                        for event in moved {
                            engine.handle_move(event);
                        }
                        for event in moved {
                            engine.handle_end(event);
                        }
                        black_box(engine);
                    },
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

fn bench_pinch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture/pinch");

    let steps = 512usize;
    let stream: Vec<InputEvent<u32>> = (0..steps)
        .map(|i| {
            let t = i as f64 / steps as f64;
            let (s, c) = (t * core::f64::consts::PI).sin_cos();
            let r = 10.0 + 40.0 * t;
            InputEvent::Touch(smallvec![
                Touch::new(1, Contact::new(0, Point::new(-r * c, -r * s))),
                Touch::new(2, Contact::new(0, Point::new(r * c, r * s))),
            ])
        })
        .collect();
    group.throughput(Throughput::Elements(steps as u64));

    group.bench_function("scale_rotate", |b| {
        b.iter_batched(
            || {
                let mut engine = Engine::new();
                engine
                    .bind(
                        0,
                        Handlers::new()
                            .on_select(|_, _| Some(0))
                            .on_scale(|action, _| {
                                black_box(action.pinch().scale);
                            })
                            .on_rotate(|action, _| {
                                black_box(action.pinch().rotation);
                            }),
                    )
                    .unwrap();
                engine.handle_start(&stream[0]);
                engine
            },
            |mut engine| {
                for event in &stream {
                    black_box(engine.handle_move(event));
                }
                black_box(engine);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_drag_stream,
    bench_concurrent_contacts,
    bench_pinch
);
criterion_main!(benches);
