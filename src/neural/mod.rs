pub mod activations;
pub mod metrics;
pub mod optimizer;

use crate::prelude::*;
use std::ops::RangeInclusive;

use crate::matrix::{ops::Dot, Matrix, Vector};
use rand::distributions::{Distribution, Uniform};

use self::activations::{Activation, Activations};

/// Activations recorded by the latest forward pass, consumed by backpropagation.
#[derive(Debug, Clone)]
struct ForwardCache {
    inputs: Vector<f64>,
    hidden_outputs: Vector<f64>,
    outputs: Vector<f64>,
}

#[derive(Debug, Clone)]
enum ForwardState {
    Uninitialized,
    ForwardComputed(ForwardCache),
}

/// Fully connected input-hidden-output network trained by backpropagation with momentum.
///
/// Row 0 of each weight matrix holds the bias weights, fed by a constant input of 1.0,
/// so `input_hidden_weights` is `(inputs + 1) x hidden` and `hidden_output_weights`
/// is `(hidden + 1) x outputs`.
#[derive(Debug, Clone)]
pub struct Network {
    input_count: usize,
    hidden_count: usize,
    output_count: usize,
    ih_weights: Matrix<f64>,
    ho_weights: Matrix<f64>,
    ih_prev_delta: Matrix<f64>,
    ho_prev_delta: Matrix<f64>,
    hidden_activation: Activations,
    output_activation: Activations,
    state: ForwardState,
}

impl Network {
    /// Creates a network with every weight set to zero.
    /// Hidden units use the clamped sigmoid, output units the clamped tanh.
    pub fn new(input_count: usize, hidden_count: usize, output_count: usize) -> Result<Self> {
        if input_count == 0 || hidden_count == 0 || output_count == 0 {
            return Err(Error::InvalidShape(format!(
                "every layer needs at least one unit, got {input_count}-{hidden_count}-{output_count}"
            )));
        }

        Ok(Self {
            input_count,
            hidden_count,
            output_count,
            ih_weights: Matrix::new(input_count + 1, hidden_count)?,
            ho_weights: Matrix::new(hidden_count + 1, output_count)?,
            ih_prev_delta: Matrix::new(input_count + 1, hidden_count)?,
            ho_prev_delta: Matrix::new(hidden_count + 1, output_count)?,
            hidden_activation: Activations::Sigmoid,
            output_activation: Activations::HyperTan,
            state: ForwardState::Uninitialized,
        })
    }

    /// Swap the hidden and output activation functions
    pub fn with_activations(mut self, hidden: Activations, output: Activations) -> Self {
        self.hidden_activation = hidden;
        self.output_activation = output;
        self
    }

    /// Reset weights to uniformly random values between a specified range.
    /// Momentum from earlier updates is discarded.
    pub fn randomize(&mut self, r: RangeInclusive<f64>) {
        let mut rng = rand::thread_rng();
        let die = Uniform::from(r);

        self.ih_weights.apply(|_| die.sample(&mut rng));
        self.ho_weights.apply(|_| die.sample(&mut rng));
        self.ih_prev_delta.zero();
        self.ho_prev_delta.zero();
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden_count
    }

    pub fn output_count(&self) -> usize {
        self.output_count
    }

    pub fn input_hidden_weights(&self) -> &Matrix<f64> {
        &self.ih_weights
    }

    pub fn hidden_output_weights(&self) -> &Matrix<f64> {
        &self.ho_weights
    }

    pub fn total_weight_count(&self) -> usize {
        (self.input_count + 1) * self.hidden_count + (self.hidden_count + 1) * self.output_count
    }

    /// Loads every weight from a flat vector: the input-to-hidden matrix row-major first,
    /// then the hidden-to-output matrix. The stored momentum deltas are kept, so the
    /// next update still adds `alpha` times the previous step.
    pub fn set_weights(&mut self, weights: &Vector<f64>) -> Result<()> {
        let expected = self.total_weight_count();
        if weights.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                actual: weights.len(),
            });
        }

        let ih_weights = Matrix::reshape(weights, self.input_count + 1, self.hidden_count, 0)?;
        let offset = (self.input_count + 1) * self.hidden_count;
        let ho_weights =
            Matrix::reshape(weights, self.hidden_count + 1, self.output_count, offset)?;

        self.ih_weights = ih_weights;
        self.ho_weights = ho_weights;
        Ok(())
    }

    /// Flattens every weight in the order `set_weights` reads them.
    pub fn weights(&self) -> Vector<f64> {
        Vector::from_vec(
            self.ih_weights
                .as_slice()
                .iter()
                .chain(self.ho_weights.as_slice())
                .copied()
                .collect(),
        )
    }

    /// Propagates an input through both layers, remembering the activations
    /// for the next call to `update_weights`.
    pub fn compute_outputs(&mut self, inputs: &Vector<f64>) -> Result<Vector<f64>> {
        if inputs.len() != self.input_count {
            return Err(Error::ShapeMismatch {
                expected: self.input_count,
                actual: inputs.len(),
            });
        }

        let hidden_sums = inputs.prepend(1.0).dot(&self.ih_weights)?;
        let hidden_outputs = hidden_sums.map(|&x| self.hidden_activation.call(x));

        let output_sums = hidden_outputs.prepend(1.0).dot(&self.ho_weights)?;
        let outputs = output_sums.map(|&x| self.output_activation.call(x));

        self.state = ForwardState::ForwardComputed(ForwardCache {
            inputs: inputs.clone(),
            hidden_outputs,
            outputs: outputs.clone(),
        });
        Ok(outputs)
    }

    /// Backpropagates the error between `targets` and the last computed outputs,
    /// then moves every weight by `eta * gradient * input` plus `alpha` times
    /// that weight's previous step.
    pub fn update_weights(&mut self, targets: &Vector<f64>, eta: f64, alpha: f64) -> Result<()> {
        if targets.len() != self.output_count {
            return Err(Error::ShapeMismatch {
                expected: self.output_count,
                actual: targets.len(),
            });
        }
        if !(eta.is_finite() && eta > 0.0) {
            return Err(Error::InvalidHyperparameter {
                name: "eta",
                value: eta,
            });
        }
        if !(alpha.is_finite() && alpha >= 0.0) {
            return Err(Error::InvalidHyperparameter {
                name: "alpha",
                value: alpha,
            });
        }
        let ForwardState::ForwardComputed(cache) = &self.state else {
            return Err(Error::InvalidState(
                "update_weights called before compute_outputs",
            ));
        };

        let output_gradients: Vec<f64> = (0..self.output_count)
            .map(|i| {
                let out = cache.outputs[i];
                self.output_activation.derivative(out) * (targets[i] - out)
            })
            .collect();

        // row 0 of the hidden-to-output weights is the bias row, hence i + 1
        let hidden_gradients: Vec<f64> = (0..self.hidden_count)
            .map(|i| {
                let mut sum = 0.0;
                for (j, grad) in output_gradients.iter().enumerate() {
                    sum += grad * self.ho_weights[(i + 1, j)];
                }
                self.hidden_activation.derivative(cache.hidden_outputs[i]) * sum
            })
            .collect();

        for i in 0..=self.input_count {
            let input = if i == 0 { 1.0 } else { cache.inputs[i - 1] };
            for (j, grad) in hidden_gradients.iter().enumerate() {
                let delta = eta * grad * input;
                self.ih_weights[(i, j)] += delta + alpha * self.ih_prev_delta[(i, j)];
                self.ih_prev_delta[(i, j)] = delta;
            }
        }

        for i in 0..=self.hidden_count {
            let hidden = if i == 0 {
                1.0
            } else {
                cache.hidden_outputs[i - 1]
            };
            for (j, grad) in output_gradients.iter().enumerate() {
                let delta = eta * grad * hidden;
                self.ho_weights[(i, j)] += delta + alpha * self.ho_prev_delta[(i, j)];
                self.ho_prev_delta[(i, j)] = delta;
            }
        }

        Ok(())
    }
}
