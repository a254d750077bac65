pub trait Activation {
    /// Returns activation function at x
    fn call(&self, x: f64) -> f64;
    /// Returns derivative of activation function with respect to the function at x.
    /// For example, if our activation is sigmoid, then we would express the
    /// derivative as `a_x * (1-a_x)` instead of `sigmoid(a_x)(1-sigmoid(a_x))`.
    fn derivative(&self, a_x: f64) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activations {
    Identity,
    /// Clamped logistic sigmoid, range (0, 1)
    Sigmoid,
    /// Clamped hyperbolic tangent, range (-1, 1)
    HyperTan,
}

/// Logistic sigmoid saturated to exactly 0 below -45 and 1 above 45.
pub fn logistic_sigmoid(x: f64) -> f64 {
    if x < -45.0 {
        0.0
    } else if x > 45.0 {
        1.0
    } else {
        1.0 / (1.0 + (-x).exp())
    }
}

/// Hyperbolic tangent saturated to exactly -1 below -10 and 1 above 10.
pub fn bounded_tanh(x: f64) -> f64 {
    if x < -10.0 {
        -1.0
    } else if x > 10.0 {
        1.0
    } else {
        let (pos, neg) = (x.exp(), (-x).exp());
        (pos - neg) / (pos + neg)
    }
}

impl Activation for Activations {
    fn call(&self, x: f64) -> f64 {
        use Activations::*;
        match self {
            Identity => x,
            Sigmoid => logistic_sigmoid(x),
            HyperTan => bounded_tanh(x),
        }
    }

    fn derivative(&self, a_x: f64) -> f64 {
        use Activations::*;
        match self {
            Identity => 1.0,
            Sigmoid => (1.0 - a_x) * a_x,
            HyperTan => (1.0 - a_x) * (1.0 + a_x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_reference_value() {
        assert_eq!(logistic_sigmoid(1.0), 0.7310585786300049);
        assert_eq!(logistic_sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_clamps() {
        assert_eq!(logistic_sigmoid(-45.5), 0.0);
        assert_eq!(logistic_sigmoid(45.5), 1.0);
        assert_eq!(logistic_sigmoid(-1000.0), 0.0);
        assert_eq!(logistic_sigmoid(1000.0), 1.0);
        // the boundaries themselves go through the exponential
        assert_relative_eq!(logistic_sigmoid(-45.0), 0.0, epsilon = 1e-18);
        assert_relative_eq!(logistic_sigmoid(45.0), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn tanh_clamps() {
        assert_eq!(bounded_tanh(-10.5), -1.0);
        assert_eq!(bounded_tanh(10.5), 1.0);
        assert_relative_eq!(bounded_tanh(-10.0), -1.0, epsilon = 1e-8);
        assert_relative_eq!(bounded_tanh(10.0), 1.0, epsilon = 1e-8);
    }

    #[test]
    fn tanh_matches_std() {
        for x in [-3.0, -0.5, 0.0, 0.25, 1.0, 2.5] {
            assert_relative_eq!(bounded_tanh(x), f64::tanh(x), epsilon = 1e-12);
        }
        assert_eq!(bounded_tanh(0.0), 0.0);
    }

    #[test]
    fn derivatives_in_terms_of_output() {
        let s = logistic_sigmoid(0.3);
        assert_relative_eq!(Activations::Sigmoid.derivative(s), s * (1.0 - s));

        let t = bounded_tanh(0.3);
        assert_relative_eq!(Activations::HyperTan.derivative(t), 1.0 - t * t, epsilon = 1e-15);

        assert_eq!(Activations::Identity.derivative(42.0), 1.0);
    }

    #[test]
    fn enum_dispatch() {
        assert_eq!(Activations::Sigmoid.call(1.0), logistic_sigmoid(1.0));
        assert_eq!(Activations::HyperTan.call(-0.7), bounded_tanh(-0.7));
        assert_eq!(Activations::Identity.call(-0.7), -0.7);
    }
}
