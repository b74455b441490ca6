//! Least-squares polynomial fitting.

/// A polynomial in channel units, coefficients lowest order first.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Coefficients, lowest order first.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Evaluate at `x` (Horner).
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * x + c)
    }
}

/// Fit a polynomial of `degree` through `(x, y)` by least squares.
///
/// The system is solved in normalized coordinates and expanded back, so
/// large channel numbers do not ruin the conditioning.
///
/// Returns `None` if there are fewer distinct x values than coefficients or
/// the normal equations are singular.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn polyfit(x: &[f64], y: &[f64], degree: usize) -> Option<Polynomial> {
    let terms = degree + 1;
    if x.len() != y.len() || x.len() < terms {
        return None;
    }
    let mut distinct = x.to_vec();
    distinct.sort_unstable_by(f64::total_cmp);
    distinct.dedup();
    if distinct.len() < terms {
        return None;
    }

    let shift = x.iter().sum::<f64>() / x.len() as f64;
    let scale = x
        .iter()
        .map(|v| (v - shift).abs())
        .fold(0.0_f64, f64::max)
        .max(1.0);

    // normal equations A^T A c = A^T y in t = (x - shift) / scale
    let mut matrix = vec![vec![0.0; terms + 1]; terms];
    for (&xi, &yi) in x.iter().zip(y) {
        let t = (xi - shift) / scale;
        let powers: Vec<f64> = (0..terms)
            .scan(1.0, |p, _| {
                let current = *p;
                *p *= t;
                Some(current)
            })
            .collect();
        for (row, &pr) in matrix.iter_mut().zip(&powers) {
            for (cell, &pc) in row.iter_mut().zip(&powers) {
                *cell += pr * pc;
            }
            row[terms] += pr * yi;
        }
    }
    let normalized = solve(matrix)?;
    Some(Polynomial {
        coefficients: expand(&normalized, shift, scale),
    })
}

/// Gaussian elimination with partial pivoting on an augmented matrix.
fn solve(mut m: Vec<Vec<f64>>) -> Option<Vec<f64>> {
    let n = m.len();
    for col in 0..n {
        let pivot = (col..n).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
        if m[pivot][col].abs() < 1e-12 {
            return None;
        }
        m.swap(col, pivot);
        for row in col + 1..n {
            let factor = m[row][col] / m[col][col];
            for k in col..=n {
                m[row][k] -= factor * m[col][k];
            }
        }
    }
    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| m[row][k] * solution[k]).sum();
        solution[row] = (m[row][n] - tail) / m[row][row];
    }
    solution.iter().all(|v| v.is_finite()).then_some(solution)
}

/// Rewrite `p(t)`, `t = (x - shift) / scale`, as a polynomial in `x`.
fn expand(normalized: &[f64], shift: f64, scale: f64) -> Vec<f64> {
    let a0 = -shift / scale;
    let a1 = 1.0 / scale;
    let mut result: Vec<f64> = vec![0.0];
    for &c in normalized.iter().rev() {
        // result = result * (a0 + a1 x) + c
        let mut next = vec![0.0; result.len() + 1];
        for (k, &r) in result.iter().enumerate() {
            next[k] += r * a0;
            next[k + 1] += r * a1;
        }
        next[0] += c;
        result = next;
    }
    result.truncate(normalized.len());
    result
}
