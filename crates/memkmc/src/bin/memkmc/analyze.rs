use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use memkmc_analysis::{
    analyze_specnum_file, average_curves, load_iec_wu, write_average, write_iec_wu, AverageConfig,
};
use memkmc_core::write_file;
use tracing::{info, warn};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Zacros specnum output file
    pub specnum: PathBuf,
    /// Output IEC/WU file
    #[arg(short, long, default_value = "IEC_WU.dat")]
    pub output: PathBuf,
}

pub fn specnum(args: &AnalyzeArgs) -> Result<()> {
    let analysis = analyze_specnum_file(&args.specnum)
        .with_context(|| format!("analysing {}", args.specnum.display()))?;
    write_file(&args.output, |w| write_iec_wu(w, &analysis))
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(output = %args.output.display(), samples = analysis.iec.len(), "wrote IEC/WU series");
    Ok(())
}

#[derive(Args)]
pub struct AverageArgs {
    /// IEC_WU files written by `memkmc analyze`
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
    /// Output file for the averaged curve
    #[arg(short, long, default_value = "WUvsIEC.dat")]
    pub output: PathBuf,
    /// First IEC value of the common axis
    #[arg(long, default_value_t = 1.4)]
    pub x_min: f64,
    /// Last IEC value of the common axis
    #[arg(long, default_value_t = 2.3)]
    pub x_max: f64,
    /// Number of points on the common axis
    #[arg(long, default_value_t = 200)]
    pub npts: usize,
}

pub fn average(args: &AverageArgs) -> Result<()> {
    let mut curves = Vec::with_capacity(args.files.len());
    for path in &args.files {
        if !path.exists() {
            warn!(file = %path.display(), "skipping missing file");
            continue;
        }
        curves.push(load_iec_wu(path).with_context(|| format!("reading {}", path.display()))?);
    }
    let config = AverageConfig {
        x_min: args.x_min,
        x_max: args.x_max,
        npts: args.npts,
        ..AverageConfig::default()
    };
    let avg = average_curves(&curves, &config)?;
    write_file(&args.output, |w| write_average(w, &avg))
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(output = %args.output.display(), curves = avg.n_curves, "wrote averaged curve");
    Ok(())
}
