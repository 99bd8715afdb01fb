use crate::phenotype::Phenotype;

/// Scores a phenotype against the problem it was built for.
///
/// Scores are costs: non-negative, lower is better, zero is a perfect
/// individual. A score must depend only on the phenotype and the context so
/// that evaluating the same individual twice yields the same value.
pub trait Challenge<Pheno: Phenotype> {
    fn score(&self, phenotype: &Pheno, context: &Pheno::Context) -> f64;
}
