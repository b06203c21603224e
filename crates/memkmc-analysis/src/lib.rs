//! Post-run analysis of Zacros simulations.
//!
//! [`specnum`] turns a species-number time series into ion exchange
//! capacity, water uptake and hydrophilic volume fraction. [`average`]
//! combines the resulting WU-vs-IEC curves from several seeds into one
//! mean curve on a common IEC axis.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod average;
pub mod error;
pub mod specnum;

pub use average::{
    average_curves, interp, load_iec_wu, read_iec_wu, write_average, AverageConfig,
    AveragedCurve, IecWuCurve,
};
pub use error::AnalysisError;
pub use specnum::{
    analyze, analyze_specnum_file, iec_at_degradation, load_specnum, read_specnum, write_iec_wu,
    SpecnumAnalysis, SpecnumSeries,
};
