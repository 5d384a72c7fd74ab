//! Output sinks: the fixed-width text report and the PNG chart.

pub mod chart;
pub mod report;
pub mod sink;
pub mod viewer;
