//! Portfolio optimization benchmark.
//!
//! Each problem has `assets` decision variables and `factors` risk
//! factors.  Times are the average, over `repetitions` solves with
//! fresh random data, of one solve of the second order cone program.

use crate::chart::{Chart, Series};

pub const XLABEL: &str = "factors/assets";
pub const DEFAULT_STYLE: &str = "seaborn";

/// Size of one benchmark problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSize {
    pub assets: usize,
    pub factors: usize,
    /// Number of solves the time was averaged over.
    pub repetitions: usize,
}

const fn size(assets: usize, factors: usize, repetitions: usize)
              -> ProblemSize {
    ProblemSize { assets, factors, repetitions }
}

pub const SIZES: [ProblemSize; 8] = [
    size(100, 5, 10000),
    size(300, 10, 5000),
    size(500, 20, 1000),
    size(1000, 30, 100),
    size(2000, 40, 100),
    size(4000, 50, 100),
    size(7500, 60, 50),
    size(10000, 70, 25),
];

/// Average solve times [s] of ECOS.
pub const ECOS: [f64; 8] = [
    0.00174351, 0.00689504, 0.017456, 0.0551517,
    0.163868, 0.493795, 1.80399, 3.81043,
];

/// Average solve times [s] of EiCOS.
pub const EICOS: [f64; 8] = [
    0.00247334, 0.0109077, 0.0214008, 0.0555743,
    0.169381, 0.467405, 1.26279, 2.80828,
];

impl ProblemSize {
    /// Two-line tick label: assets above factors.
    pub fn label(&self) -> String {
        format!("{}\n{}", self.assets, self.factors)
    }
}

/// The ECOS vs. EiCOS comparison chart.
pub fn portfolio() -> Chart {
    Chart::new(SIZES.iter().map(ProblemSize::label))
        .series(Series::new("ECOS", ECOS))
        .series(Series::new("EiCOS", EICOS))
        .xlabel(XLABEL)
        .style(DEFAULT_STYLE)
}
