//! Plot average solve times of the [ECOS][] and EiCOS conic solvers
//! on the portfolio benchmark, using the [Matplotlib][] Python
//! visualization library.
//!
//! Usage
//! -----
//!
//! A [`Chart`] is a list of category labels plus one or more named
//! [`Series`] of the same length.  It is drawn with a logarithmic
//! y-axis, one line with point markers per series, and a legend.
//!
//! ```
//! use solver_timings::{Chart, Series};
//! let chart = Chart::new(["100\n5", "300\n10"])
//!     .series(Series::new("A", [0.001, 0.005]));
//! chart.validate()?;
//! # Ok::<(), solver_timings::Error>(())
//! ```
//!
//! [ECOS]: https://github.com/embotech/ecos
//! [Matplotlib]: https://matplotlib.org/

use std::fmt::{Display, Formatter};
use pyo3::PyErr;

pub mod bench;
pub mod chart;
pub mod pyplot;

pub use chart::{Chart, Series};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

/// Possible errors when building or rendering a chart.
#[derive(Debug)]
pub enum Error {
    /// The Python library "matplotlib" was not found.
    NoMatplotlib,
    /// The path contains an element that is not a directory or does
    /// not exist.
    FileNotFoundError,
    /// Permission denied to access or create the filesystem path.
    PermissionError,
    /// A series does not have one value per category label.
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },
    /// The chart has nothing to draw.
    NoSeries,
    /// Other Python errors.
    Python(PyErr),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::NoMatplotlib =>
                write!(f, "The matplotlib library has not been found.\n\
Please install it.  See https://matplotlib.org/\n\
If you use Anaconda, see https://github.com/PyO3/pyo3/issues/1554"),
            Error::FileNotFoundError =>
                write!(f, "A path contains an element that is not a \
                           directory or does not exist"),
            Error::PermissionError =>
                write!(f, "Permission denied to access or create the \
                           filesystem path"),
            Error::LengthMismatch { series, expected, found } =>
                write!(f, "Series {:?} has {} values but there are {} \
                           category labels", series, found, expected),
            Error::NoSeries =>
                write!(f, "The chart has no series to plot"),
            Error::Python(e) =>
                write!(f, "Python error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<PyErr> for Error {
    fn from(e: PyErr) -> Self {
        Error::Python(e)
    }
}
