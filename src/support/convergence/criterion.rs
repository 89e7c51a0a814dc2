/// Measures how far a guess moved in one step.
pub trait Criterion<G> {
    /// A non-negative change, compared against the relative tolerance.
    fn change(&self, previous: &G, next: &G) -> f64;
}

/// `|next − previous| / |previous|`, or zero when `previous` is exactly zero.
#[must_use]
pub fn relative_change(previous: f64, next: f64) -> f64 {
    if previous == 0.0 {
        0.0
    } else {
        ((next - previous) / previous).abs()
    }
}

/// [`relative_change`] on a scalar guess.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeChange;

impl Criterion<f64> for RelativeChange {
    fn change(&self, previous: &f64, next: &f64) -> f64 {
        relative_change(*previous, *next)
    }
}

/// Largest component change of a fixed-size guess.
impl<const N: usize> Criterion<[f64; N]> for RelativeChange {
    fn change(&self, previous: &[f64; N], next: &[f64; N]) -> f64 {
        previous
            .iter()
            .zip(next)
            .map(|(&p, &n)| relative_change(p, n))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn largest_component_wins() {
        let change = RelativeChange.change(&[300.0, 350.0], &[303.0, 350.0]);
        assert!((change - 0.01).abs() < 1e-12);
    }

    #[test]
    fn zero_component_is_converged() {
        assert_eq!(relative_change(0.0, 5.0), 0.0);
    }
}
