//! Randomness port.

/// Port for the randomness behind confidence perturbation
///
/// Production wiring uses an entropy-seeded generator; tests pin the source
/// to a seed or a fixed sequence so scoring becomes reproducible.
///
/// Implementations are shared across concurrent analyses and must
/// synchronize internally.
///
/// # Examples
///
/// ```no_run
/// use loginprobe::domain::ports::RandomSource;
///
/// fn coin_flip(source: &dyn RandomSource) -> bool {
///     source.next_unit() < 0.5
/// }
/// ```
pub trait RandomSource: Send + Sync {
    /// Next uniformly distributed value in `[0, 1)`.
    fn next_unit(&self) -> f64;
}
