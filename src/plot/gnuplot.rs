//! gnuplot script + data file writer.
//!
//! A [`GnuPlot`] talks to gnuplot only through files:
//!
//! - `BASENAME{k}.dat`: two whitespace-separated columns per plot element
//!   (`k` counts elements from 0, in insertion order)
//! - `BASENAME.gpi`: `set` options followed by one `plot` command
//!
//! Running `gnuplot BASENAME.gpi` produces `BASENAME.pdf` through the
//! `pdfcairo` terminal. Functions (such as fits) are sampled into data files;
//! gnuplot's own function plotting is never used.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::Utc;

use crate::data::linspace;
use crate::error::AppError;

/// How gnuplot draws one plot element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotStyle {
    Points,
    Lines,
}

impl fmt::Display for PlotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotStyle::Points => write!(f, "points"),
            PlotStyle::Lines => write!(f, "lines"),
        }
    }
}

impl FromStr for PlotStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "points" => Ok(PlotStyle::Points),
            "lines" => Ok(PlotStyle::Lines),
            other => Err(AppError::new(2, format!("unknown plot style '{other}'"))),
        }
    }
}

/// Placement of the key (legend).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    Below,
    Outside,
}

impl fmt::Display for KeyStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStyle::Below => write!(f, "below"),
            KeyStyle::Outside => write!(f, "outside"),
        }
    }
}

impl FromStr for KeyStyle {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "below" => Ok(KeyStyle::Below),
            "outside" => Ok(KeyStyle::Outside),
            other => Err(AppError::new(2, format!("unknown key style '{other}'"))),
        }
    }
}

/// One argument of gnuplot's `plot` command.
#[derive(Debug, Clone)]
struct PlotElement {
    datafile: String,
    style: PlotStyle,
    title: String,
    points: Vec<(f64, f64)>,
}

impl fmt::Display for PlotElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" with {} title \"{}\"",
            self.datafile, self.style, self.title
        )
    }
}

/// A graph that can be written out as gnuplot input.
#[derive(Debug, Clone)]
pub struct GnuPlot {
    basename: String,
    options: BTreeMap<String, String>,
    elements: Vec<PlotElement>,
}

impl GnuPlot {
    /// New graph with the grid on and the key below the plot.
    pub fn new(basename: impl Into<String>) -> Self {
        let basename = basename.into();
        let mut options = BTreeMap::new();
        options.insert("grid".to_string(), String::new());
        options.insert("key".to_string(), KeyStyle::Below.to_string());
        options.insert("output".to_string(), format!("\"{basename}.pdf\""));
        options.insert("term".to_string(), "pdfcairo".to_string());
        Self {
            basename,
            options,
            elements: Vec::new(),
        }
    }

    pub fn grid(&mut self, on: bool) -> &mut Self {
        if on {
            self.options.insert("grid".to_string(), String::new());
        } else {
            self.options.remove("grid");
        }
        self
    }

    pub fn key(&mut self, key: KeyStyle) -> &mut Self {
        self.options.insert("key".to_string(), key.to_string());
        self
    }

    /// An empty label removes it.
    pub fn xlabel(&mut self, label: &str) -> &mut Self {
        self.set_label("xlabel", label)
    }

    pub fn ylabel(&mut self, label: &str) -> &mut Self {
        self.set_label("ylabel", label)
    }

    /// Equal bounds remove the range (gnuplot autoscales).
    pub fn xrange(&mut self, x1: f64, x2: f64) -> &mut Self {
        self.set_range("xrange", x1, x2)
    }

    pub fn yrange(&mut self, y1: f64, y2: f64) -> &mut Self {
        self.set_range("yrange", y1, y2)
    }

    /// Sample `f` at `n` evenly spaced points on `[x1, x2]` and add it as an element.
    pub fn add_func_plot(
        &mut self,
        x1: f64,
        x2: f64,
        n: usize,
        f: impl Fn(f64) -> f64,
        style: PlotStyle,
        title: &str,
    ) -> Result<&mut Self, AppError> {
        if n < 2 {
            return Err(AppError::new(2, "At least two points required for function plot."));
        }
        let points = linspace(x1, x2, n).into_iter().map(|x| (x, f(x))).collect();
        Ok(self.push_element(points, style, title))
    }

    /// Add a two-column data set as an element.
    pub fn add_data_plot(&mut self, data: &[(f64, f64)], style: PlotStyle, title: &str) -> &mut Self {
        self.push_element(data.to_vec(), style, title)
    }

    /// Contents of the `.gpi` script.
    pub fn script(&self) -> String {
        let mut out = String::from("\n");
        for (key, value) in &self.options {
            if value.is_empty() {
                out.push_str(&format!("set {key}\n"));
            } else {
                out.push_str(&format!("set {key} {value}\n"));
            }
        }
        out.push_str("\nplot");
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&format!("\\\n {element}"));
        }
        out.push_str("\n\n");
        out
    }

    /// Write every data file and the `.gpi` script; returns the script path.
    pub fn write(&self) -> Result<PathBuf, AppError> {
        for element in &self.elements {
            write_data_file(&element.datafile, &element.points)?;
        }

        let path = PathBuf::from(format!("{}.gpi", self.basename));
        let mut file = File::create(&path)
            .map_err(|e| AppError::new(2, format!("Failed to create '{}': {e}", path.display())))?;
        write!(
            file,
            "# generated by linreg at {}\n{}",
            Utc::now().to_rfc3339(),
            self.script()
        )
        .map_err(|e| AppError::new(2, format!("Failed to write '{}': {e}", path.display())))?;
        Ok(path)
    }

    fn push_element(&mut self, points: Vec<(f64, f64)>, style: PlotStyle, title: &str) -> &mut Self {
        let datafile = format!("{}{}.dat", self.basename, self.elements.len());
        self.elements.push(PlotElement {
            datafile,
            style,
            title: title.to_string(),
            points,
        });
        self
    }

    fn set_label(&mut self, key: &str, label: &str) -> &mut Self {
        if label.is_empty() {
            self.options.remove(key);
        } else {
            self.options.insert(key.to_string(), format!("\"{label}\""));
        }
        self
    }

    fn set_range(&mut self, key: &str, lo: f64, hi: f64) -> &mut Self {
        if lo == hi {
            self.options.remove(key);
        } else {
            self.options.insert(key.to_string(), format!("[{lo}:{hi}]"));
        }
        self
    }
}

fn write_data_file(name: &str, points: &[(f64, f64)]) -> Result<(), AppError> {
    let file = File::create(name).map_err(|e| AppError::new(2, format!("Failed to create '{name}': {e}")))?;
    let mut out = BufWriter::new(file);
    for &(x, y) in points {
        writeln!(out, "{x} {y}").map_err(|e| AppError::new(2, format!("Failed to write '{name}': {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to write '{name}': {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_golden_snapshot() {
        let mut plot = GnuPlot::new("out/sin");
        plot.xlabel("x").yrange(-2.0, 2.0);
        plot.add_data_plot(&[(0.0, 1.0)], PlotStyle::Points, "data");
        plot.add_func_plot(0.0, 1.0, 3, |x| 2.0 * x, PlotStyle::Lines, "fit")
            .unwrap();

        let expected = concat!(
            "\n",
            "set grid\n",
            "set key below\n",
            "set output \"out/sin.pdf\"\n",
            "set term pdfcairo\n",
            "set xlabel \"x\"\n",
            "set yrange [-2:2]\n",
            "\n",
            "plot\\\n",
            " \"out/sin0.dat\" with points title \"data\",\\\n",
            " \"out/sin1.dat\" with lines title \"fit\"\n",
            "\n",
        );
        assert_eq!(plot.script(), expected);
    }

    #[test]
    fn options_can_be_cleared() {
        let mut plot = GnuPlot::new("g");
        plot.grid(false).key(KeyStyle::Outside).xrange(1.0, 1.0).ylabel("");
        let script = plot.script();
        assert!(!script.contains("set grid"));
        assert!(script.contains("set key outside\n"));
        assert!(!script.contains("xrange"));
    }

    #[test]
    fn styles_parse_and_reject_unknown() {
        assert_eq!("points".parse::<PlotStyle>().unwrap(), PlotStyle::Points);
        assert_eq!("below".parse::<KeyStyle>().unwrap(), KeyStyle::Below);
        assert!("dots".parse::<PlotStyle>().is_err());
        assert!("inside".parse::<KeyStyle>().is_err());
    }

    #[test]
    fn function_plot_needs_two_points() {
        let mut plot = GnuPlot::new("g");
        assert!(plot.add_func_plot(0.0, 1.0, 1, |x| x, PlotStyle::Lines, "f").is_err());
    }

    #[test]
    fn write_produces_data_files_and_script() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("fit").to_string_lossy().into_owned();

        let mut plot = GnuPlot::new(base.clone());
        plot.add_data_plot(&[(0.0, 1.5), (1.0, 2.5)], PlotStyle::Points, "data");
        let script = plot.write().unwrap();

        let data = std::fs::read_to_string(format!("{base}0.dat")).unwrap();
        assert_eq!(data, "0 1.5\n1 2.5\n");
        let gpi = std::fs::read_to_string(&script).unwrap();
        assert!(gpi.starts_with("# generated by linreg at "));
        assert!(gpi.ends_with(&plot.script()));
    }
}
