//! Thin layer over Matplotlib's explicit interface.
//!
//! Only the pieces needed to draw categorical line charts are bound:
//! figures, a single [`Axes`], scales, labels, legends, style sheets,
//! saving and the blocking [`show`].

use std::path::Path;
use lazy_static::lazy_static;
use log::debug;
use ndarray::Array1;
use numpy::ToPyArray;
use pyo3::{
    prelude::*,
    intern,
    exceptions::{PyFileNotFoundError, PyPermissionError},
    types::{PyDict, PyList},
};
use crate::Error;

/// Import and return a handle to the module `$m`.
macro_rules! pyimport { ($m: literal) => {
    Python::with_gil(|py|
        PyModule::import_bound(py, $m).map(|m| m.unbind()))
}}

lazy_static! {
    static ref FIGURE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.figure")
    };
    static ref PYPLOT: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.pyplot")
    };
    static ref STYLE: Result<Py<PyModule>, PyErr> = {
        pyimport!("matplotlib.style")
    };
}

/// Return a handle to the module `$m`.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Call the method `$m` of the Python object `$obj` with positional
/// arguments `$args`, discarding the returned value.
macro_rules! meth {
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| {
            $obj.bind(py)
                .call_method1(intern!(py, stringify!($m)), $args)
                .map(|_| ())
                .map_err(Error::from)
        })
    };
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

/// A single set of axes inside a [`Figure`].
#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

/// Scale of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Linear,
    /// Logarithmic scale.  Non-positive values are masked, i.e. the
    /// corresponding points are not drawn.
    Log,
}

impl Scale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Linear => "linear",
            Scale::Log => "log",
        }
    }
}

/// What was actually drawn for one line of an [`Axes`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub label: String,
    /// Positions on the x-axis.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Whether each point has a place on the y-axis scale.  Points
    /// masked by a logarithmic scale are `false`.
    pub shown: Vec<bool>,
}

impl Figure {
    /// Return a new `Figure` that is not managed by pyplot.  It is
    /// never displayed but can be saved without any GUI backend.
    pub fn new() -> Result<Figure, Error> {
        let figure = pymod!(FIGURE)?;
        Python::with_gil(|py| {
            let fig = figure.bind(py)
                .getattr(intern!(py, "Figure"))?
                .call0()?;
            Ok(Self { fig: fig.unbind() })
        })
    }

    /// Add a single set of axes covering the whole figure.
    pub fn axes(&self) -> Result<Axes, Error> {
        Python::with_gil(|py| {
            let ax = self.fig.bind(py)
                .call_method0(intern!(py, "subplots"))?;
            Ok(Axes { ax: ax.unbind() })
        })
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None }
    }
}

pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
}

impl Savefig {
    /// Set the resolution in dots per inch.  Non-positive values
    /// revert to Matplotlib's default.
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Write the figure to `path`.  The format is deduced from the
    /// extension.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        debug!("saving figure to {}", path.display());
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if let Some(dpi) = self.dpi {
                kwargs.set_item("dpi", dpi)?;
            }
            self.fig.bind(py).call_method(
                intern!(py, "savefig"), (path,), Some(&kwargs)
            ).map_err(|e| {
                if e.is_instance_of::<PyFileNotFoundError>(py) {
                    Error::FileNotFoundError
                } else if e.is_instance_of::<PyPermissionError>(py) {
                    Error::PermissionError
                } else {
                    Error::Python(e)
                }
            })?;
            Ok(())
        })
    }
}

/// Return a new figure managed by pyplot, so that [`show`] displays it.
pub fn figure() -> Result<Figure, Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        let fig = pyplot.bind(py)
            .getattr(intern!(py, "figure"))?
            .call0()?;
        Ok(Figure { fig: fig.unbind() })
    })
}

/// Return a pyplot managed figure together with its single axes.
pub fn subplots() -> Result<(Figure, Axes), Error> {
    let fig = figure()?;
    let ax = fig.axes()?;
    Ok((fig, ax))
}

/// Display all open figures.  Blocks until their windows are closed
/// (with an interactive backend).
pub fn show() -> Result<(), Error> {
    let pyplot = pymod!(PYPLOT)?;
    Python::with_gil(|py| {
        pyplot.bind(py).getattr(intern!(py, "show"))?.call0()?;
        Ok(())
    })
}

/// Apply the style sheet `name` to the figures created afterwards.
pub fn use_style(name: &str) -> Result<(), Error> {
    let style = pymod!(STYLE)?;
    Python::with_gil(|py| {
        style.bind(py).getattr(intern!(py, "use"))?.call1((name,))?;
        Ok(())
    })
}

impl Axes {
    /// Plot `y` against the categories `labels` as lines and/or
    /// markers.  `fmt` is a Matplotlib format string such as `"."` or
    /// `"r-"`; `label` is the legend entry (none if empty).
    ///
    /// The i-th value is placed at x = i and the i-th label becomes
    /// its tick, so repeated labels keep distinct positions.
    pub fn plot_categories<S>(
        &mut self, labels: &[S], y: &Array1<f64>, fmt: &str,
        linestyle: &str, label: &str) -> Result<&mut Self, Error>
    where S: AsRef<str> {
        let positions: Array1<f64> =
            (0 .. labels.len()).map(|i| i as f64).collect();
        Python::with_gil(|py| {
            let ax = self.ax.bind(py);
            let xn = positions.to_pyarray_bound(py);
            let yn = y.to_pyarray_bound(py);
            let kwargs = PyDict::new_bound(py);
            if !linestyle.is_empty() {
                kwargs.set_item("linestyle", linestyle)?;
            }
            if !label.is_empty() {
                kwargs.set_item("label", label)?;
            }
            ax.call_method(intern!(py, "plot"), (&xn, yn, fmt), Some(&kwargs))?;
            let ticks = PyDict::new_bound(py);
            ticks.set_item(
                "labels", PyList::new_bound(py, labels.iter().map(|l| l.as_ref())))?;
            ax.call_method(intern!(py, "set_xticks"), (xn,), Some(&ticks))?;
            Ok::<(), Error>(())
        })?;
        Ok(self)
    }

    /// Return the texts of the x-axis ticks, in order.
    pub fn xtick_labels(&self) -> Result<Vec<String>, Error> {
        Python::with_gil(|py| {
            let mut labels: Vec<String> = vec![];
            for t in self.ax.bind(py)
                .call_method0(intern!(py, "get_xticklabels"))?.iter()? {
                labels.push(t?.call_method0(intern!(py, "get_text"))?
                            .extract()?);
            }
            Ok(labels)
        })
    }

    /// Set the scale of the y-axis.
    pub fn set_yscale(&mut self, scale: Scale) -> Result<&mut Self, Error> {
        Python::with_gil(|py| {
            let kwargs = PyDict::new_bound(py);
            if scale == Scale::Log {
                kwargs.set_item("nonpositive", "mask")?;
            }
            self.ax.bind(py).call_method(
                intern!(py, "set_yscale"), (scale.as_str(),), Some(&kwargs))?;
            Ok::<(), Error>(())
        })?;
        Ok(self)
    }

    pub fn yscale(&self) -> Result<String, Error> {
        Python::with_gil(|py| {
            let s: String = self.ax.bind(py)
                .call_method0(intern!(py, "get_yscale"))?
                .extract()?;
            Ok(s)
        })
    }

    pub fn set_xlabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, (label,))?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, (label,))?;
        Ok(self)
    }

    /// Place a legend listing every labelled line.
    pub fn legend(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, legend, ())?;
        Ok(self)
    }

    /// Return the texts of the legend, in order.  Empty if no legend
    /// was placed.
    pub fn legend_labels(&self) -> Result<Vec<String>, Error> {
        Python::with_gil(|py| {
            let legend = self.ax.bind(py)
                .call_method0(intern!(py, "get_legend"))?;
            if legend.is_none() {
                return Ok(vec![])
            }
            let mut labels: Vec<String> = vec![];
            for t in legend.call_method0(intern!(py, "get_texts"))?.iter()? {
                labels.push(t?.call_method0(intern!(py, "get_text"))?
                            .extract()?);
            }
            Ok(labels)
        })
    }

    /// Return the lines drawn so far, in drawing order.
    pub fn traces(&self) -> Result<Vec<Trace>, Error> {
        Python::with_gil(|py| {
            let lines = self.ax.bind(py)
                .call_method0(intern!(py, "get_lines"))?;
            let converted = PyDict::new_bound(py);
            converted.set_item("orig", false)?;
            let yscale = self.ax.bind(py)
                .getattr(intern!(py, "yaxis"))?
                .call_method0(intern!(py, "get_transform"))?;
            let mut traces = vec![];
            for line in lines.iter()? {
                let line = line?;
                let label = line.call_method0(intern!(py, "get_label"))?
                    .extract()?;
                let x = line
                    .call_method(intern!(py, "get_xdata"), (), Some(&converted))?
                    .call_method0(intern!(py, "tolist"))?
                    .extract()?;
                let yn = line
                    .call_method(intern!(py, "get_ydata"), (), Some(&converted))?;
                let y = yn.call_method0(intern!(py, "tolist"))?.extract()?;
                let scaled: Vec<f64> = yscale
                    .call_method1(intern!(py, "transform"), (yn,))?
                    .call_method0(intern!(py, "tolist"))?
                    .extract()?;
                let shown = scaled.iter().map(|v| v.is_finite()).collect();
                traces.push(Trace { label, x, y, shown });
            }
            Ok(traces)
        })
    }
}
