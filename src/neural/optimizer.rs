use std::sync::mpsc;

use tracing::{debug, info};

use crate::{
    matrix::{Matrix, Vector},
    neural::{metrics::sum_absolute_error, Network},
    prelude::*,
    viz::Visualizer,
};

/// Outcome of a training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Number of update passes over the samples that were run
    pub iterations: usize,
    /// Error after the last pass
    pub error: f64,
    /// Error before training followed by the error after every pass
    pub history: Vec<f64>,
}

/// Drives a `Network` with online momentum updates until the error drops to
/// `target_error` or `iterations` passes have run.
pub struct Optimizer {
    iterations: usize,
    iterations_per_log: Option<usize>,
    target_error: Option<f64>,
    rate: f64,
    momentum: f64,
}

impl Optimizer {
    pub fn new(iterations: usize, rate: f64) -> Self {
        Self {
            iterations,
            iterations_per_log: None,
            target_error: None,
            rate,
            momentum: 0.0,
        }
    }

    pub fn with_momentum(mut self, momentum: f64) -> Self {
        self.momentum = momentum;
        self
    }

    /// Stop as soon as the summed absolute error is at or below `target_error`
    pub fn with_target_error(mut self, target_error: Option<f64>) -> Self {
        self.target_error = target_error;
        self
    }

    pub fn with_log(mut self, iterations_per_log: Option<usize>) -> Self {
        self.iterations_per_log = iterations_per_log;
        self
    }

    pub fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
    }

    pub fn set_iterations(&mut self, iterations: usize) {
        self.iterations = iterations;
    }

    /// Trains on the rows of `inputs` against the matching rows of `targets`.
    pub fn train(
        &self,
        net: &mut Network,
        inputs: &Matrix<f64>,
        targets: &Matrix<f64>,
    ) -> Result<TrainReport> {
        self.run(net, inputs, targets, |_, _, _| Ok(()))
    }

    /// Trains on a worker thread while a `Gui` window plots the error.
    pub fn train_gui<Gui: Visualizer>(
        &self,
        net: &mut Network,
        inputs: &Matrix<f64>,
        targets: &Matrix<f64>,
    ) -> Result<TrainReport> {
        std::thread::scope(|scope| -> Result<TrainReport> {
            let (tx, rx) = mpsc::channel();
            let handle = scope.spawn(move || -> Result<TrainReport> {
                self.run(net, inputs, targets, |i, error, outputs| {
                    tx.send((i, error, outputs.clone()))
                        .map_err(|_| Error::ThreadErr)
                })
            });

            let _ = eframe::run_native(
                "momentum_nn",
                eframe::NativeOptions::default(),
                Box::new(|cc| Box::new(Gui::new(cc, rx))),
            );

            handle.join().map_err(|_| Error::ThreadErr)?
        })
    }

    fn run<F>(
        &self,
        net: &mut Network,
        inputs: &Matrix<f64>,
        targets: &Matrix<f64>,
        mut on_log: F,
    ) -> Result<TrainReport>
    where
        F: FnMut(usize, f64, &Vector<f64>) -> Result<()>,
    {
        let (samples, _) = inputs.shape()?;
        let (target_rows, _) = targets.shape()?;
        if samples != target_rows {
            return Err(Error::ShapeMismatch {
                expected: samples,
                actual: target_rows,
            });
        }

        let (mut error, _) = evaluate(net, inputs, targets)?;
        let mut history = vec![error];
        let mut iterations = 0;

        while iterations < self.iterations && !self.converged(error) {
            for row in 0..samples {
                net.compute_outputs(&inputs.row(row))?;
                net.update_weights(&targets.row(row), self.rate, self.momentum)?;
            }

            let (new_error, last_outputs) = evaluate(net, inputs, targets)?;
            error = new_error;
            history.push(error);

            if self
                .iterations_per_log
                .is_some_and(|ipl| ipl > 0 && iterations % ipl == 0)
            {
                info!(iteration = iterations, error, "training");
                on_log(iterations, error, &last_outputs)?;
            }
            iterations += 1;
        }

        if self.converged(error) {
            debug!(iterations, error, "target error reached");
        }

        Ok(TrainReport {
            iterations,
            error,
            history,
        })
    }

    fn converged(&self, error: f64) -> bool {
        self.target_error.is_some_and(|target| error <= target)
    }
}

/// Summed absolute error over every sample, plus the outputs of the last sample.
fn evaluate(
    net: &mut Network,
    inputs: &Matrix<f64>,
    targets: &Matrix<f64>,
) -> Result<(f64, Vector<f64>)> {
    let mut error = 0.0;
    let mut outputs = Vector::new(net.output_count());
    for row in 0..inputs.rows() {
        outputs = net.compute_outputs(&inputs.row(row))?;
        error += sum_absolute_error(&targets.row(row), &outputs)?;
    }
    Ok((error, outputs))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_net() -> Network {
        let mut net = Network::new(3, 4, 2).unwrap();
        net.set_weights(&Vector::from_array([
            -2.0, -6.0, -1.0, -7.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1, 1.2,
            -2.5, -5.0, 1.3, 1.4, 1.5, 1.6, 1.7, 1.8, 1.9, 2.0,
        ]))
        .unwrap();
        net
    }

    #[test]
    fn train_until_target_error() {
        let mut net = demo_net();
        let inputs = Matrix::from_array([[1.0, 2.0, 3.0]]);
        let targets = Matrix::from_array([[-0.85, 0.75]]);

        let optim = Optimizer::new(1_000, 0.90)
            .with_momentum(0.04)
            .with_target_error(Some(0.01))
            .with_log(Some(1));
        let report = optim.train(&mut net, &inputs, &targets).unwrap();

        println!("Final error: {} after {}", report.error, report.iterations);

        assert!(report.error <= 0.01);
        assert!(report.iterations < 1_000);
        assert_eq!(report.history.len(), report.iterations + 1);
        assert_eq!(report.history.last(), Some(&report.error));
        assert!(report.history[0] > 3.0);
    }

    #[test]
    fn runs_every_iteration_without_target() {
        let mut net = demo_net();
        let inputs = Matrix::from_array([[1.0, 2.0, 3.0]]);
        let targets = Matrix::from_array([[-0.85, 0.75]]);

        let mut optim = Optimizer::new(5, 0.9);
        optim.set_iterations(25);
        optim.set_rate(0.5);
        let report = optim.train(&mut net, &inputs, &targets).unwrap();

        assert_eq!(report.iterations, 25);
        assert_eq!(report.history.len(), 26);
    }

    #[test]
    fn already_converged() {
        let mut net = Network::new(2, 2, 1).unwrap();
        let inputs = Matrix::from_array([[0.3, 0.7]]);
        // zero weights produce an output of exactly 0
        let targets = Matrix::from_array([[0.0]]);

        let report = Optimizer::new(100, 0.5)
            .with_target_error(Some(0.01))
            .train(&mut net, &inputs, &targets)
            .unwrap();

        assert_eq!(report.iterations, 0);
        assert_eq!(report.history, vec![0.0]);
    }

    #[test]
    fn train_several_samples() {
        let mut net = Network::new(2, 3, 1).unwrap();
        net.randomize(-0.5..=0.5);

        let inputs = Matrix::from_array([[0, 0], [0, 1], [1, 0], [1, 1]]).into();
        let targets = Matrix::from_array([[-0.5], [0.5], [0.5], [0.5]]).into();

        let report = Optimizer::new(2_000, 0.3)
            .with_momentum(0.1)
            .with_target_error(Some(0.1))
            .train(&mut net, &inputs, &targets)
            .unwrap();

        assert!(report.error < report.history[0]);
    }

    #[test]
    fn mismatched_samples() {
        let mut net = demo_net();
        let inputs = Matrix::from_array([[1.0, 2.0, 3.0], [3.0, 2.0, 1.0]]);
        let targets = Matrix::from_array([[-0.85, 0.75]]);

        assert_eq!(
            Optimizer::new(10, 0.9).train(&mut net, &inputs, &targets),
            Err(Error::ShapeMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn wrong_sample_width() {
        let mut net = demo_net();
        let inputs = Matrix::from_array([[1.0, 2.0]]);
        let targets = Matrix::from_array([[-0.85, 0.75]]);

        assert_eq!(
            Optimizer::new(10, 0.9).train(&mut net, &inputs, &targets),
            Err(Error::ShapeMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn log_callback_failure_stops_training() {
        let mut net = demo_net();
        let inputs = Matrix::from_array([[1.0, 2.0, 3.0]]);
        let targets = Matrix::from_array([[-0.85, 0.75]]);

        let optim = Optimizer::new(10, 0.9).with_log(Some(1));
        let res = optim.run(&mut net, &inputs, &targets, |_, _, _| Err(Error::ThreadErr));
        assert_eq!(res, Err(Error::ThreadErr));
    }
}
