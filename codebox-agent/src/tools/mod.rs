//! Tools that agents register: sandbox code execution, chart generation and
//! the simulated save helpers.

mod chart;
mod dataset;
mod execute;
mod save;

pub use chart::{chart_script, AnalysisKind, ChartTool};
pub use dataset::{sample_sales_csv, SALES_COLUMNS};
pub use execute::ExecuteCodeTool;
pub use save::{SaveFindingTool, SaveResultTool};
