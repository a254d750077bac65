use crate::{matrix::Vector, prelude::*};

fn check_len(targets: &Vector<f64>, outputs: &Vector<f64>) -> Result<()> {
    if targets.len() != outputs.len() {
        return Err(Error::ShapeMismatch {
            expected: targets.len(),
            actual: outputs.len(),
        });
    }
    Ok(())
}

/// Sum of absolute differences between targets and outputs.
pub fn sum_absolute_error(targets: &Vector<f64>, outputs: &Vector<f64>) -> Result<f64> {
    check_len(targets, outputs)?;
    Ok(targets
        .iter()
        .zip(outputs.iter())
        .map(|(t, o)| (t - o).abs())
        .sum())
}

/// Mean-squared error
pub fn mean_squared_error(targets: &Vector<f64>, outputs: &Vector<f64>) -> Result<f64> {
    check_len(targets, outputs)?;
    if targets.is_empty() {
        return Ok(0.0);
    }

    let sum: f64 = targets
        .iter()
        .zip(outputs.iter())
        .map(|(t, o)| (t - o) * (t - o))
        .sum();
    Ok(sum / targets.len() as f64)
}
