//! Chart generation over the sample sales table.
//!
//! The script sent to the sandbox is assembled from fixed parts: variable
//! bindings (every caller-supplied value as an escaped literal), a preamble
//! that loads and describes the data, one body per [`AnalysisKind`], and an
//! epilogue that saves the figure under `/tmp`.

use async_trait::async_trait;
use codebox_sandbox::script::python_literal;
use codebox_sandbox::{Language, ReportStyle, SandboxClient};
use serde::Deserialize;
use std::sync::Arc;

use crate::tool::{decode_arguments, tool_error, Tool};

const PREAMBLE: &str = include_str!("chart/preamble.py");
const EPILOGUE: &str = include_str!("chart/epilogue.py");

const DESCRIPTION: &str = "Analyze the sales data and create a visualization chart. \
The sales data CSV is already loaded with columns: Date, Product, Category, Units_Sold, \
Revenue, Region. The chart is saved as a PNG at /tmp/{output_filename}. \
Returns the analysis results and confirmation of chart generation.";

/// Which analysis a chart request maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    RevenueByCategory,
    RevenueByRegion,
    TopProducts,
    DailyTrend,
    Default,
}

impl AnalysisKind {
    /// Keyword match on the description, first rule wins.
    pub fn classify(analysis_description: &str) -> Self {
        let d = analysis_description.to_lowercase();
        if d.contains("revenue") && d.contains("category") {
            AnalysisKind::RevenueByCategory
        } else if d.contains("region") {
            AnalysisKind::RevenueByRegion
        } else if d.contains("product") && d.contains("top") {
            AnalysisKind::TopProducts
        } else if d.contains("trend") || d.contains("time") {
            AnalysisKind::DailyTrend
        } else {
            AnalysisKind::Default
        }
    }

    fn body(&self) -> &'static str {
        match self {
            AnalysisKind::RevenueByCategory => include_str!("chart/revenue_by_category.py"),
            AnalysisKind::RevenueByRegion => include_str!("chart/revenue_by_region.py"),
            AnalysisKind::TopProducts => include_str!("chart/top_products.py"),
            AnalysisKind::DailyTrend => include_str!("chart/daily_trend.py"),
            AnalysisKind::Default => include_str!("chart/default.py"),
        }
    }
}

/// Build the Python chart script.
pub fn chart_script(
    csv: &str,
    kind: AnalysisKind,
    chart_type: &str,
    analysis_description: &str,
    output_filename: &str,
) -> String {
    let mut script = format!(
        "csv_content = {}\nanalysis_description = {}\nchart_type = {}\noutput_filename = {}\n\n",
        python_literal(csv),
        python_literal(analysis_description),
        python_literal(chart_type),
        python_literal(output_filename),
    );
    script.push_str(PREAMBLE);
    script.push_str(kind.body());
    script.push_str(EPILOGUE);
    script
}

fn is_bare_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains('\\') && !name.contains("..")
}

/// `analyze_data_and_create_chart`: runs a chart script over the dataset the
/// tool was built with.
pub struct ChartTool {
    client: SandboxClient,
    dataset: Arc<str>,
}

#[derive(Debug, Deserialize)]
struct ChartArgs {
    chart_type: String,
    analysis_description: String,
    output_filename: String,
}

impl ChartTool {
    pub fn new(client: SandboxClient, dataset: impl Into<Arc<str>>) -> Self {
        Self {
            client,
            dataset: dataset.into(),
        }
    }
}

#[async_trait(?Send)]
impl Tool for ChartTool {
    fn name(&self) -> &str {
        "analyze_data_and_create_chart"
    }

    fn description(&self) -> &str {
        DESCRIPTION
    }

    fn parameters(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "chart_type": {
                    "type": "string",
                    "description": "Type of chart (bar, line, horizontal_bar, pie, ...)"
                },
                "analysis_description": {
                    "type": "string",
                    "description": "What analysis or insight to visualize"
                },
                "output_filename": {
                    "type": "string",
                    "description": "Name for the output PNG file, e.g. revenue_by_category.png"
                }
            },
            "required": ["chart_type", "analysis_description", "output_filename"]
        })
    }

    async fn call(&self, arguments: serde_json::Value) -> String {
        let args: ChartArgs = match decode_arguments(self.name(), arguments) {
            Ok(args) => args,
            Err(e) => return tool_error(e.message()),
        };
        if !is_bare_file_name(&args.output_filename) {
            return format!("❌ Error: invalid output filename '{}'", args.output_filename);
        }

        let kind = AnalysisKind::classify(&args.analysis_description);
        tracing::debug!(?kind, chart_type = %args.chart_type, file = %args.output_filename, "generating chart");

        let script = chart_script(
            &self.dataset,
            kind,
            &args.chart_type,
            &args.analysis_description,
            &args.output_filename,
        );
        let outcome = self.client.execute(&script, Language::Python, false).await;
        ReportStyle::Chart.render_outcome(&outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_ordered() {
        use AnalysisKind::*;
        assert_eq!(AnalysisKind::classify("Total revenue by product category"), RevenueByCategory);
        assert_eq!(AnalysisKind::classify("Total revenue by region"), RevenueByRegion);
        assert_eq!(AnalysisKind::classify("Top 5 products by total revenue"), TopProducts);
        assert_eq!(AnalysisKind::classify("Daily revenue trend over time"), DailyTrend);
        assert_eq!(AnalysisKind::classify("Units sold histogram"), Default);
        // category + revenue outranks region
        assert_eq!(AnalysisKind::classify("REVENUE per CATEGORY and region"), RevenueByCategory);
        // region outranks top products
        assert_eq!(AnalysisKind::classify("top products per region"), RevenueByRegion);
        assert_eq!(AnalysisKind::classify("sales over time"), DailyTrend);
    }

    #[test]
    fn script_escapes_every_interpolated_value() {
        let script = chart_script(
            "a,b\n1,2\n",
            AnalysisKind::Default,
            "bar\"); import os #",
            "it's \"quoted\"\nsecond line",
            "chart.png",
        );
        assert!(script.starts_with("csv_content = \"a,b\\n1,2\\n\"\n"));
        assert!(script.contains("chart_type = \"bar\\\"); import os #\"\n"));
        assert!(script.contains("analysis_description = \"it's \\\"quoted\\\"\\nsecond line\"\n"));
        assert!(script.contains("output_filename = \"chart.png\"\n"));
        assert!(script.contains("Revenue Analysis"));
        assert!(script.contains("plt.savefig(output_path"));
    }

    #[test]
    fn file_names_must_be_bare() {
        assert!(is_bare_file_name("daily_trend.png"));
        for bad in ["", "../x.png", "dir/x.png", "dir\\x.png", ".."] {
            assert!(!is_bare_file_name(bad), "{bad:?}");
        }
    }

    #[tokio::test]
    async fn invalid_file_name_never_reaches_the_sandbox() {
        // Unroutable base URL: any request would surface as a transport error.
        let client = SandboxClient::builder()
            .base_url("http://127.0.0.1:9")
            .api_key("k")
            .build()
            .unwrap();
        let tool = ChartTool::new(client, "a,b\n");
        let text = tool
            .call(serde_json::json!({
                "chart_type": "bar",
                "analysis_description": "revenue by region",
                "output_filename": "../../etc/passwd"
            }))
            .await;
        assert_eq!(text, "❌ Error: invalid output filename '../../etc/passwd'");
    }
}
