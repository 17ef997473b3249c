use racha_domain::Ratio;

pub trait ExactValueFormatter: Send + Sync {
    /// Renders an unrounded amount given in cents.
    fn format(&self, exact_cents: &Ratio) -> String;
}
