use momentum_nn::{
    matrix::{Matrix, Vector},
    neural::{optimizer::Optimizer, Network},
    viz::ErrorPlot,
};
use tracing::{info, Level};

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let mut net = Network::new(3, 4, 2).expect("3-4-2 is a valid topology");
    net.set_weights(&Vector::from_array([
        -2.0, -6.0, -1.0, -7.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2, -2.5,
        -5.0, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0,
    ]))
    .expect("26 weights for a 3-4-2 network");

    let inputs = Matrix::from_array([[1.0, 2.0, 3.0]]);
    let targets = Matrix::from_array([[-0.85, 0.75]]);

    let optim = Optimizer::new(1_000, 0.90)
        .with_momentum(0.04)
        .with_target_error(Some(0.01))
        .with_log(Some(1));

    let report = match optim.train_gui::<ErrorPlot>(&mut net, &inputs, &targets) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("training failed: {err}");
            return;
        }
    };

    println!("------------------");
    println!(
        "Final error {} after {} iterations",
        report.error, report.iterations
    );

    match net.compute_outputs(&inputs.row(0)) {
        Ok(out) => info!("{:?} -> {:?}", inputs.row(0).as_slice(), out.as_slice()),
        Err(err) => eprintln!("forward pass failed: {err}"),
    }
    println!("Final weights: {:?}", net.weights().as_slice());
}
