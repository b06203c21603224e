//! Averaging WU-vs-IEC curves from several runs onto a common IEC axis.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use memkmc_core::ConfigError;
use tracing::{debug, info};

use crate::error::AnalysisError;

/// One run's WU against IEC, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IecWuCurve {
    /// IEC samples.
    pub iec: Vec<f64>,
    /// WU samples.
    pub wu: Vec<f64>,
}

impl IecWuCurve {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.iec.len()
    }

    /// `true` if the curve has no points.
    pub fn is_empty(&self) -> bool {
        self.iec.is_empty()
    }
}

/// Read the IEC and WU columns of an `IEC_WU` file.
///
/// The first line is a header; rows with fewer than three columns are
/// skipped.
pub fn read_iec_wu<R: BufRead>(reader: R) -> Result<IecWuCurve, AnalysisError> {
    let mut curve = IecWuCurve::default();
    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            continue;
        }
        let num = |col: usize| {
            fields[col]
                .parse::<f64>()
                .map_err(|_| AnalysisError::parse(i + 1, format!("invalid number '{}'", fields[col])))
        };
        curve.iec.push(num(1)?);
        curve.wu.push(num(2)?);
    }
    if curve.is_empty() {
        return Err(AnalysisError::NoData);
    }
    Ok(curve)
}

/// Open and read an `IEC_WU` file.
pub fn load_iec_wu<P: AsRef<Path>>(path: P) -> Result<IecWuCurve, AnalysisError> {
    let file = File::open(path.as_ref())?;
    read_iec_wu(BufReader::new(file))
}

/// Common axis and inclusion threshold for [`average_curves`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AverageConfig {
    /// First IEC value of the common axis.
    pub x_min: f64,
    /// Last IEC value of the common axis.
    pub x_max: f64,
    /// Number of points on the common axis.
    pub npts: usize,
    /// Curves with this many points or fewer are left out.
    pub min_points: usize,
}

impl Default for AverageConfig {
    fn default() -> Self {
        Self {
            x_min: 1.4,
            x_max: 2.3,
            npts: 200,
            min_points: 10,
        }
    }
}

impl AverageConfig {
    /// The axis must be finite and increasing with at least two points.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.x_min.is_finite() || !self.x_max.is_finite() || self.x_min >= self.x_max {
            return Err(ConfigError::InvalidParameter {
                name: "x_min/x_max",
                reason: format!(
                    "need finite x_min < x_max, got {} and {}",
                    self.x_min, self.x_max
                ),
            });
        }
        if self.npts < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "npts",
                reason: format!("need at least 2 points, got {}", self.npts),
            });
        }
        Ok(())
    }

    /// The common axis: `npts` evenly spaced values, both ends included.
    pub fn axis(&self) -> Vec<f64> {
        let step = (self.x_max - self.x_min) / (self.npts - 1) as f64;
        (0..self.npts)
            .map(|i| {
                if i + 1 == self.npts {
                    self.x_max
                } else {
                    self.x_min + step * i as f64
                }
            })
            .collect()
    }
}

/// Piecewise-linear interpolation of sorted `(xp, fp)` at `x`.
///
/// Outside `[xp[0], xp[last]]` the end values are held.
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return f64::NAN;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // First index with xp[hi] > x; 1 <= hi < n here.
    let hi = xp[..n].partition_point(|&v| v <= x);
    let lo = hi - 1;
    fp[lo] + (x - xp[lo]) * (fp[hi] - fp[lo]) / (xp[hi] - xp[lo])
}

/// The mean curve on the common axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AveragedCurve {
    /// Common IEC axis.
    pub iec: Vec<f64>,
    /// Mean WU at each axis point.
    pub wu: Vec<f64>,
    /// Curves that contributed.
    pub n_curves: usize,
}

/// Interpolate every sufficiently long curve onto the common axis and
/// average them point by point.
pub fn average_curves(
    curves: &[IecWuCurve],
    config: &AverageConfig,
) -> Result<AveragedCurve, AnalysisError> {
    config.validate()?;
    let axis = config.axis();
    let mut sum = vec![0.0; axis.len()];
    let mut n_curves = 0usize;

    for (i, curve) in curves.iter().enumerate() {
        if curve.len() <= config.min_points {
            debug!(curve = i, points = curve.len(), "curve too short, left out");
            continue;
        }
        let mut points: Vec<(f64, f64)> =
            curve.iec.iter().copied().zip(curve.wu.iter().copied()).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        let (xp, fp): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        for (acc, &x) in sum.iter_mut().zip(&axis) {
            *acc += interp(x, &xp, &fp);
        }
        n_curves += 1;
    }

    if n_curves == 0 {
        return Err(AnalysisError::NoCurves {
            offered: curves.len(),
        });
    }
    let wu = sum.into_iter().map(|s| s / n_curves as f64).collect();
    info!(curves = n_curves, offered = curves.len(), "averaged IEC/WU curves");
    Ok(AveragedCurve {
        iec: axis,
        wu,
        n_curves,
    })
}

/// Write the averaged curve as `IEC WU` tab-separated `%8.4f` columns.
pub fn write_average(w: &mut dyn Write, curve: &AveragedCurve) -> Result<(), AnalysisError> {
    writeln!(w, "IEC\tWU")?;
    for (x, y) in curve.iec.iter().zip(&curve.wu) {
        writeln!(w, "{x:8.4}\t{y:8.4}")?;
    }
    Ok(())
}
