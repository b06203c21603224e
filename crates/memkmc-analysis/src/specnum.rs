//! Zacros `specnum` time series: IEC, water uptake and hydrophilic volume.
//!
//! With `j` the sample index and `0` the first sample:
//!
//! ```text
//! VWU = MW[j] / (POL[0] + TMA[0])
//! WU  = 0.74637 * VWU - 0.07734
//! deg = clamp((TMA[0] - TMA[j]) / TMA[0], 0, 1)
//! IEC = 1000 * 0.33 * (1 - deg) / (0.33 * (1 - deg) * MC + 0.67 * MN + 0.33 * deg * MD)
//! VH  = (MW[j] + TMA[j]) / (MW[j] + TMA[j] + POL[0])
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::AnalysisError;

/// Molar mass of the charged (TMA-bearing) repeat unit, g/mol.
pub const MC: f64 = 192.28;
/// Molar mass of the neutral repeat unit, g/mol.
pub const MN: f64 = 118.133;
/// Molar mass of the degraded repeat unit, g/mol.
pub const MD: f64 = 118.133 + 14.0 + 13.0;

const WU_SLOPE: f64 = 0.74637;
const WU_INTERCEPT: f64 = -0.07734;

/// Columns of a specnum file, 0-based.
const TIME_COL: usize = 2;
const TMA_COL: usize = 5;
const POL_COL: usize = 6;
const MW_COL: usize = 7;
const MIN_COLUMNS: usize = 8;

/// Species counts over time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpecnumSeries {
    /// Simulated time.
    pub time: Vec<f64>,
    /// `tma*` count.
    pub tma: Vec<f64>,
    /// `mem*` (polymer) count.
    pub pol: Vec<f64>,
    /// `mw*` (water) count.
    pub mw: Vec<f64>,
}

impl SpecnumSeries {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// `true` if there are no samples.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Read a specnum file.
///
/// The first line is a header. Rows with fewer than eight columns are
/// skipped; the rest must have numeric time and species columns.
pub fn read_specnum<R: BufRead>(reader: R) -> Result<SpecnumSeries, AnalysisError> {
    let mut series = SpecnumSeries::default();
    let mut skipped = 0usize;
    for (i, line) in reader.lines().enumerate().skip(1) {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_COLUMNS {
            skipped += 1;
            continue;
        }
        let num = |col: usize| {
            fields[col]
                .parse::<f64>()
                .map_err(|_| AnalysisError::parse(i + 1, format!("invalid number '{}'", fields[col])))
        };
        series.time.push(num(TIME_COL)?);
        series.tma.push(num(TMA_COL)?);
        series.pol.push(num(POL_COL)?);
        series.mw.push(num(MW_COL)?);
    }
    if series.is_empty() {
        return Err(AnalysisError::NoData);
    }
    debug!(samples = series.len(), skipped, "read specnum series");
    Ok(series)
}

/// Open and read a specnum file.
pub fn load_specnum<P: AsRef<Path>>(path: P) -> Result<SpecnumSeries, AnalysisError> {
    let file = File::open(path.as_ref())?;
    read_specnum(BufReader::new(file))
}

/// A series with its derived membrane descriptors.
#[derive(Clone, Debug, PartialEq)]
pub struct SpecnumAnalysis {
    /// The input series.
    pub series: SpecnumSeries,
    /// Ion exchange capacity, mmol/g.
    pub iec: Vec<f64>,
    /// Water uptake.
    pub wu: Vec<f64>,
    /// Hydrophilic volume fraction.
    pub vh: Vec<f64>,
}

/// IEC of a membrane whose TMA groups are degraded by fraction `deg`.
pub fn iec_at_degradation(deg: f64) -> f64 {
    let deg = deg.clamp(0.0, 1.0);
    let num = 1000.0 * 0.33 * (1.0 - deg);
    let den = 0.33 * (1.0 - deg) * MC + 0.67 * MN + deg * 0.33 * MD;
    num / den
}

/// Derive IEC, WU and VH for every sample.
pub fn analyze(series: SpecnumSeries) -> Result<SpecnumAnalysis, AnalysisError> {
    let (Some(&tma0), Some(&pol0)) = (series.tma.first(), series.pol.first()) else {
        return Err(AnalysisError::NoData);
    };
    if tma0 == 0.0 {
        return Err(AnalysisError::ZeroInitialTma);
    }
    let sites0 = pol0 + tma0;
    if sites0 == 0.0 {
        return Err(AnalysisError::ZeroInitialSites);
    }

    let n = series.len();
    let mut iec = Vec::with_capacity(n);
    let mut wu = Vec::with_capacity(n);
    let mut vh = Vec::with_capacity(n);
    for (&tma, &mw) in series.tma.iter().zip(&series.mw) {
        wu.push(WU_SLOPE * (mw / sites0) + WU_INTERCEPT);
        iec.push(iec_at_degradation((tma0 - tma) / tma0));
        vh.push((mw + tma) / (mw + tma + pol0));
    }
    Ok(SpecnumAnalysis {
        series,
        iec,
        wu,
        vh,
    })
}

/// Read and analyse a specnum file.
pub fn analyze_specnum_file<P: AsRef<Path>>(path: P) -> Result<SpecnumAnalysis, AnalysisError> {
    let path = path.as_ref();
    let analysis = analyze(load_specnum(path)?)?;
    info!(
        file = %path.display(),
        samples = analysis.series.len(),
        "analysed specnum series"
    );
    Ok(analysis)
}

/// Write `time IEC WU VH` as tab-separated `%8.4f` columns under a header.
pub fn write_iec_wu(w: &mut dyn Write, analysis: &SpecnumAnalysis) -> Result<(), AnalysisError> {
    writeln!(w, "time\tIEC\tWU\tVH")?;
    let rows = analysis
        .series
        .time
        .iter()
        .zip(&analysis.iec)
        .zip(&analysis.wu)
        .zip(&analysis.vh);
    for (((t, iec), wu), vh) in rows {
        writeln!(w, "{t:8.4}\t{iec:8.4}\t{wu:8.4}\t{vh:8.4}")?;
    }
    Ok(())
}
