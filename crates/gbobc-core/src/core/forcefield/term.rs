/// Split of a solvation free energy into its electrostatic and surface parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SolvationTerm {
    pub polar: f64,
    pub nonpolar: f64,
}

impl SolvationTerm {
    pub fn new(polar: f64, nonpolar: f64) -> Self {
        Self { polar, nonpolar }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.nonpolar + self.polar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_adds_nonpolar_before_polar() {
        let term = SolvationTerm::new(-12.5, 0.5);
        assert_eq!(term.total(), 0.5 + -12.5);
    }

    #[test]
    fn default_term_is_zero() {
        assert_eq!(SolvationTerm::default(), SolvationTerm::new(0.0, 0.0));
        assert_eq!(SolvationTerm::default().total(), 0.0);
    }
}
