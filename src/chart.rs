//! Categorical line charts with a logarithmic y-axis.

use std::{
    fmt::{self, Display, Formatter},
    path::Path,
};
use log::{debug, info, log_enabled, warn, Level};
use ndarray::Array1;
use crate::{
    pyplot::{self, Axes, Figure, Scale},
    Error,
};

pub const DEFAULT_YLABEL: &str = "avg. solve time [s]";

/// A named sequence of values, one per category label.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    name: String,
    values: Array1<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: impl Into<Vec<f64>>) -> Self {
        Series { name: name.into(), values: Array1::from(values.into()) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Labels on the x-axis and the series plotted against them.
///
/// Series are drawn in the order they were added, each as point
/// markers joined by straight segments, on a logarithmic y-axis.
/// Zero and negative values cannot be placed on that axis: they are
/// masked (the point is left out of its trace) and a warning is
/// logged.
#[derive(Debug, Clone)]
pub struct Chart {
    labels: Vec<String>,
    series: Vec<Series>,
    xlabel: String,
    ylabel: String,
    style: Option<String>,
}

impl Chart {
    pub fn new<I>(labels: I) -> Self
    where I: IntoIterator,
          I::Item: Into<String> {
        Chart {
            labels: labels.into_iter().map(Into::into).collect(),
            series: vec![],
            xlabel: String::new(),
            ylabel: DEFAULT_YLABEL.to_string(),
            style: None,
        }
    }

    /// Add a series.
    #[must_use]
    pub fn series(mut self, s: Series) -> Self {
        self.series.push(s);
        self
    }

    #[must_use]
    pub fn xlabel(mut self, label: &str) -> Self {
        self.xlabel = label.to_string();
        self
    }

    #[must_use]
    pub fn ylabel(mut self, label: &str) -> Self {
        self.ylabel = label.to_string();
        self
    }

    /// Use the Matplotlib style sheet `name` when rendering.
    #[must_use]
    pub fn style(mut self, name: &str) -> Self {
        self.style = Some(name.to_string());
        self
    }

    /// Render with Matplotlib's default style.
    #[must_use]
    pub fn no_style(mut self) -> Self {
        self.style = None;
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn all_series(&self) -> &[Series] {
        &self.series
    }

    /// Check that there is at least one series and that every series
    /// has exactly one value per label.
    pub fn validate(&self) -> Result<(), Error> {
        if self.series.is_empty() {
            return Err(Error::NoSeries)
        }
        let expected = self.labels.len();
        match self.series.iter().find(|s| s.len() != expected) {
            Some(s) => Err(Error::LengthMismatch {
                series: s.name.clone(), expected, found: s.len() }),
            None => Ok(()),
        }
    }

    /// Return the `(series name, index)` of the values that a
    /// logarithmic axis cannot show.
    pub fn nonpositive(&self) -> Vec<(&str, usize)> {
        self.series.iter()
            .flat_map(|s| {
                s.values.iter().enumerate()
                    .filter(|&(_, &v)| !(v > 0.))
                    .map(move |(i, _)| (s.name(), i))
            })
            .collect()
    }

    /// Draw the chart on `ax`.  Nothing is drawn if the chart is
    /// invalid.
    pub fn draw(&self, ax: &mut Axes) -> Result<(), Error> {
        self.validate()?;
        for (name, i) in self.nonpositive() {
            warn!("{:?}: value at {:?} is not positive and will not be \
                   shown on the log scale", name, self.labels[i]);
        }
        ax.set_yscale(Scale::Log)?;
        for s in &self.series {
            ax.plot_categories(&self.labels, &s.values, ".", "-", &s.name)?;
        }
        ax.set_xlabel(&self.xlabel)?
            .set_ylabel(&self.ylabel)?
            .legend()?;
        if log_enabled!(Level::Debug) {
            for t in ax.traces()? {
                debug!("trace {:?}: {} points", t.label, t.y.len());
            }
        }
        Ok(())
    }

    /// Display the chart in a window.  Returns once the window has
    /// been closed.
    pub fn show(&self) -> Result<(), Error> {
        self.validate()?;
        self.apply_style()?;
        let (_fig, mut ax) = pyplot::subplots()?;
        self.draw(&mut ax)?;
        info!("showing chart, close the window to exit");
        pyplot::show()
    }

    /// Render the chart off-screen and write it to `path`.  The image
    /// format follows the extension of `path`.
    pub fn save(&self, path: impl AsRef<Path>, dpi: Option<f64>)
                -> Result<(), Error> {
        self.validate()?;
        self.apply_style()?;
        let fig = Figure::new()?;
        let mut ax = fig.axes()?;
        self.draw(&mut ax)?;
        let mut savefig = fig.save();
        if let Some(dpi) = dpi {
            savefig.dpi(dpi);
        }
        savefig.to_file(&path)?;
        info!("chart written to {}", path.as_ref().display());
        Ok(())
    }

    fn apply_style(&self) -> Result<(), Error> {
        let Some(name) = &self.style else { return Ok(()) };
        for candidate in style_candidates(name) {
            match pyplot::use_style(&candidate) {
                Ok(()) => {
                    debug!("using style sheet {:?}", candidate);
                    return Ok(())
                }
                Err(Error::Python(e)) =>
                    debug!("style sheet {:?} unavailable: {}", candidate, e),
                Err(e) => return Err(e),
            }
        }
        warn!("style sheet {:?} not found, using matplotlib defaults", name);
        Ok(())
    }
}

/// Names under which the style sheet `name` may be installed.
/// Matplotlib 3.6 renamed the seaborn sheets with a `seaborn-v0_8`
/// prefix.
fn style_candidates(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string()];
    if let Some(rest) = name.strip_prefix("seaborn") {
        if !rest.starts_with("-v0_8") {
            names.push(format!("seaborn-v0_8{}", rest));
        }
    }
    names
}

/// Plain text table of the values, one row per label.  Multi-line
/// labels are joined with `/`.  Each column is as wide as its widest
/// cell.
impl Display for Chart {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fn width(s: &str) -> usize {
            s.chars().count()
        }
        let rows: Vec<String> = self.labels.iter()
            .map(|l| l.replace('\n', "/"))
            .collect();
        let w0 = rows.iter().map(|r| width(r))
            .chain([width(&self.xlabel)])
            .max().unwrap_or(0);
        let columns: Vec<Vec<String>> = self.series.iter()
            .map(|s| (0 .. rows.len())
                 .map(|i| match s.values.get(i) {
                     Some(v) => v.to_string(),
                     None => "-".to_string(),
                 })
                 .collect())
            .collect();
        let widths: Vec<usize> = self.series.iter().zip(&columns)
            .map(|(s, cells)| cells.iter().map(|c| width(c))
                 .chain([width(&s.name)])
                 .max().unwrap_or(0))
            .collect();
        write!(f, "{:<w0$}", self.xlabel)?;
        for (s, w) in self.series.iter().zip(widths.iter().copied()) {
            write!(f, "  {:>w$}", s.name)?;
        }
        writeln!(f)?;
        for (i, row) in rows.iter().enumerate() {
            write!(f, "{:<w0$}", row)?;
            for (cells, w) in columns.iter().zip(widths.iter().copied()) {
                write!(f, "  {:>w$}", cells[i])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::offscreen;

    fn two_points() -> Chart {
        Chart::new(["100\n5", "300\n10"])
            .series(Series::new("A", [0.001, 0.005]))
    }


    #[test]
    fn valid_chart() {
        assert!(two_points().validate().is_ok());
    }

    #[test]
    fn short_series_is_rejected() {
        let chart = two_points().series(Series::new("B", [0.002]));
        match chart.validate() {
            Err(Error::LengthMismatch { series, expected, found }) => {
                assert_eq!(series, "B");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            r => panic!("expected a length mismatch, got {:?}", r),
        }
    }

    #[test]
    fn long_series_is_rejected() {
        let chart = two_points()
            .series(Series::new("B", [0.002, 0.003, 0.004]));
        assert!(matches!(chart.validate(),
                         Err(Error::LengthMismatch { found: 3, .. })));
    }

    #[test]
    fn no_series() {
        let chart = Chart::new(["a", "b"]);
        assert!(matches!(chart.validate(), Err(Error::NoSeries)));
    }

    #[test]
    fn nonpositive_values() {
        let chart = Chart::new(["a", "b", "c"])
            .series(Series::new("A", [1., 0., 2.]))
            .series(Series::new("B", [-1., 3., f64::NAN]));
        assert_eq!(chart.nonpositive(),
                   vec![("A", 1), ("B", 0), ("B", 2)]);
        assert!(two_points().nonpositive().is_empty());
    }

    #[test]
    fn seaborn_aliases() {
        assert_eq!(style_candidates("seaborn"),
                   vec!["seaborn", "seaborn-v0_8"]);
        assert_eq!(style_candidates("seaborn-darkgrid"),
                   vec!["seaborn-darkgrid", "seaborn-v0_8-darkgrid"]);
        assert_eq!(style_candidates("seaborn-v0_8"), vec!["seaborn-v0_8"]);
        assert_eq!(style_candidates("ggplot"), vec!["ggplot"]);
    }

    #[test]
    fn table() {
        let chart = two_points().xlabel("assets/factors");
        assert_eq!(chart.to_string(),
                   "assets/factors      A\n\
                    100/5           0.001\n\
                    300/10          0.005\n");
    }

    #[test]
    fn table_columns_fit_their_cells() {
        let chart = Chart::new(["µs\n1", "ms\n2"])
            .series(Series::new("a rather long series name", [1.5, 20.]))
            .series(Series::new("é", [0.25, 3.]))
            .xlabel("x");
        let table = chart.to_string();
        let widths: Vec<usize> = table.lines()
            .map(|l| l.chars().count()).collect();
        assert_eq!(widths, [37; 3], "{}", table);
        assert!(table.lines().all(|l| l.ends_with("é")
                                  || l.ends_with("0.25")
                                  || l.ends_with("   3")));
    }

    #[test]
    fn one_trace() -> Result<(), Error> {
        let Some((fig, mut ax)) = offscreen()? else { return Ok(()) };
        two_points().draw(&mut ax)?;
        let traces = ax.traces()?;
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].y.len(), 2);
        assert_eq!(ax.yscale()?, "log");
        assert_eq!(ax.legend_labels()?, vec!["A"]);
        fig.save().to_file("target/one_trace.pdf")?;
        Ok(())
    }

    #[test]
    fn shared_positions() -> Result<(), Error> {
        let Some((_fig, mut ax)) = offscreen()? else { return Ok(()) };
        two_points().series(Series::new("B", [0.002, 0.004]))
            .draw(&mut ax)?;
        let traces = ax.traces()?;
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].x, traces[1].x);
        assert_ne!(traces[0].y, traces[1].y);
        assert_eq!(ax.legend_labels()?, vec!["A", "B"]);
        Ok(())
    }

    #[test]
    fn mismatch_draws_nothing() -> Result<(), Error> {
        let Some((_fig, mut ax)) = offscreen()? else { return Ok(()) };
        let chart = two_points().series(Series::new("B", [0.002]));
        assert!(chart.draw(&mut ax).is_err());
        assert!(ax.traces()?.is_empty());
        Ok(())
    }

    #[test]
    fn nonpositive_is_masked() -> Result<(), Error> {
        let Some((fig, mut ax)) = offscreen()? else { return Ok(()) };
        Chart::new(["a", "b", "c"])
            .series(Series::new("A", [0.1, 0., 0.3]))
            .draw(&mut ax)?;
        assert_eq!(ax.yscale()?, "log");
        let traces = ax.traces()?;
        assert_eq!(traces[0].y, vec![0.1, 0., 0.3]);
        assert_eq!(traces[0].shown, vec![true, false, true]);
        fig.save().to_file("target/nonpositive_is_masked.png")?;
        Ok(())
    }

    #[test]
    fn repeated_labels() -> Result<(), Error> {
        let Some((_fig, mut ax)) = offscreen()? else { return Ok(()) };
        Chart::new(["a", "a", "b"])
            .series(Series::new("A", [0.1, 0.2, 0.3]))
            .draw(&mut ax)?;
        let traces = ax.traces()?;
        assert_eq!(traces[0].x, vec![0., 1., 2.]);
        assert_eq!(ax.xtick_labels()?, vec!["a", "a", "b"]);
        Ok(())
    }

    #[test]
    fn same_input_same_image() -> Result<(), Error> {
        if offscreen()?.is_none() { return Ok(()) }
        let chart = two_points().series(Series::new("B", [0.002, 0.004]));
        chart.save("target/same_input_1.png", Some(72.))?;
        chart.save("target/same_input_2.png", Some(72.))?;
        let a = std::fs::read("target/same_input_1.png").unwrap();
        let b = std::fs::read("target/same_input_2.png").unwrap();
        assert!(a == b, "renders differ");
        Ok(())
    }
}
