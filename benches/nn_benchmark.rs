use criterion::{black_box, criterion_group, criterion_main, Criterion};
use momentum_nn::{
    matrix::{Matrix, Vector},
    neural::{optimizer::Optimizer, Network},
};

fn demo_net() -> Network {
    let mut net = Network::new(3, 4, 2).unwrap();
    net.set_weights(&Vector::from_array([
        -2.0, -6.0, -1.0, -7.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, -2.5,
        -5.0, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0,
    ]))
    .unwrap();
    net
}

fn train_demo(iterations: usize) {
    let mut net = demo_net();
    let inputs = Matrix::from_array([[1.0, 2.0, 3.0]]);
    let targets = Matrix::from_array([[-0.85, 0.75]]);

    let optim = Optimizer::new(iterations, 0.90).with_momentum(0.04);
    assert!(optim.train(&mut net, &inputs, &targets).is_ok());
}

fn train_wide(iterations: usize) {
    let mut net = Network::new(2, 25, 2).unwrap();
    net.randomize(-0.5..=0.5);

    let inputs = Matrix::from_array([[0, 0], [0, 1], [1, 0], [1, 1]]).into();
    let targets = Matrix::from_array([[0, 0], [1, 0], [1, 0], [0, 1]]).into();

    let optim = Optimizer::new(iterations, 0.1).with_momentum(0.04);
    assert!(optim.train(&mut net, &inputs, &targets).is_ok());
}

fn forward(net: &mut Network, inputs: &Matrix<f64>) {
    for i in 0..inputs.rows() {
        assert!(net.compute_outputs(&inputs.row(i)).is_ok());
    }
}

fn bench_forward(c: &mut Criterion) {
    let mut small = demo_net();

    let mut wide = Network::new(3, 25, 10).unwrap();
    wide.randomize(-1.0..=1.0);

    let input_small = Matrix::new(10, 3).unwrap();
    let input_medium = Matrix::new(1_000, 3).unwrap();

    c.bench_function("forward 3-4-2 10 inputs", |b| {
        b.iter(|| forward(black_box(&mut small), black_box(&input_small)))
    });
    c.bench_function("forward 3-4-2 1,000 inputs", |b| {
        b.iter(|| forward(black_box(&mut small), black_box(&input_medium)))
    });

    c.bench_function("forward 3-25-10 10 inputs", |b| {
        b.iter(|| forward(black_box(&mut wide), black_box(&input_small)))
    });
    c.bench_function("forward 3-25-10 1,000 inputs", |b| {
        b.iter(|| forward(black_box(&mut wide), black_box(&input_medium)))
    });
}

fn bench_demo(c: &mut Criterion) {
    c.bench_function("3-4-2 10 iterations", |b| {
        b.iter(|| train_demo(black_box(10)))
    });
    c.bench_function("3-4-2 1,000 iterations", |b| {
        b.iter(|| train_demo(black_box(1_000)))
    });
}

fn bench_wide(c: &mut Criterion) {
    c.bench_function("2-25-2 10 iterations", |b| {
        b.iter(|| train_wide(black_box(10)))
    });
    c.bench_function("2-25-2 1,000 iterations", |b| {
        b.iter(|| train_wide(black_box(1_000)))
    });
}

criterion_group!(benches, bench_forward, bench_demo, bench_wide);
criterion_main!(benches);
