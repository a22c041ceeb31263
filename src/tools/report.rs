use std::fmt::{Display, Formatter};
use std::time::Duration;

/// What one compression run achieved.
#[derive(Debug, Clone)]
pub struct Report {
    pub name: String,
    pub original: usize,
    pub compressed: usize,
    pub elapsed: Duration,
}

impl Report {
    /// Percentage saved. Negative when the container is larger than the input, and zero for
    /// empty input.
    pub fn reduction(&self) -> f64 {
        if self.original == 0 {
            return 0.0;
        }
        (self.original as f64 - self.compressed as f64) / self.original as f64 * 100.0
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} -> {} bytes, {:.2}% reduction, {:.4} seconds",
            self.name,
            self.original,
            self.compressed,
            self.reduction(),
            self.elapsed.as_secs_f64()
        )
    }
}
