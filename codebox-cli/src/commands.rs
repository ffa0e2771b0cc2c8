//! Command implementations.

use codebox_agent::tools::sample_sales_csv;
use codebox_agent::{Agent, RunResult, Runner};
use codebox_error::Result;
use codebox_llm::LlmProvider;
use codebox_sandbox::transfer;
use codebox_sandbox::SandboxClient;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agents;

const RULE: &str = "────────────────────────────────────────────────────────────────────────────────";

/// Words that end an interactive session (case-insensitive).
const EXIT_WORDS: [&str; 4] = ["exit", "quit", "bye", "q"];

pub fn is_exit_word(input: &str) -> bool {
    EXIT_WORDS.iter().any(|w| input.eq_ignore_ascii_case(w))
}

fn print_stats(result: &RunResult, elapsed: f64) {
    println!(
        "\n⏱️  Completed in {:.1}s  •  {} turns  •  {} tool calls  •  {} tokens",
        elapsed,
        result.turns,
        result.tool_calls,
        result.usage.total_tokens()
    );
}

/// Run one task on one agent and print the answer.
pub async fn run_task<P: LlmProvider>(
    runner: &Runner<P>,
    agent: &Agent,
    task: &str,
    quiet: bool,
) -> Result<RunResult> {
    if !quiet {
        println!("🤖 {} working on: {}\n{}", agent.name(), task, RULE);
    }

    let started = Instant::now();
    let result = runner.run(agent, task).await?;

    if quiet {
        println!("{}", result.final_output);
    } else {
        println!("\n✅ Result: {}", result.final_output);
        print_stats(&result, started.elapsed().as_secs_f64());
    }
    Ok(result)
}

/// Interactive loop. Ctrl-C at the prompt ends the session; during a task it
/// abandons that task only.
pub async fn chat<P: LlmProvider>(runner: &Runner<P>, agent: &Agent) -> Result<()> {
    println!("💬 Chat with a code-executing AI agent");
    println!("Type 'exit', 'quit', or 'bye' to end the session.\n{}\n", RULE);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let started = Instant::now();
    let mut completed = 0usize;

    loop {
        print!("You ➤ ");
        let _ = std::io::stdout().flush();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\n\n⚠️  Session interrupted by user");
                break;
            }
        };
        // EOF
        let Some(line) = line else {
            println!();
            break;
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if is_exit_word(input) {
            break;
        }

        println!("\n🤖 AI Agent Processing...");
        let task_started = Instant::now();
        let outcome = tokio::select! {
            outcome = runner.run(agent, input) => Some(outcome),
            _ = tokio::signal::ctrl_c() => None,
        };

        match outcome {
            Some(Ok(result)) => {
                completed += 1;
                println!("\n🤖 AI Response:\n{}\n", RULE);
                println!("{}", result.final_output);
                println!(
                    "\n⏱️  Completed in {:.2}s  •  Task #{}  •  Session: {:.0}s\n{}\n",
                    task_started.elapsed().as_secs_f64(),
                    completed,
                    started.elapsed().as_secs_f64(),
                    RULE
                );
            }
            Some(Err(e)) => {
                tracing::debug!(error = ?e, "chat task failed");
                println!("\n❌ Error: {}", e);
                println!("💡 Please try again or type 'exit' to quit.\n");
            }
            None => println!("\n⚠️  Task cancelled\n"),
        }
    }

    println!(
        "\n📊 Session: {} tasks in {:.1}s",
        completed,
        started.elapsed().as_secs_f64()
    );
    println!("👋 Goodbye!\n");
    Ok(())
}

/// Multi-agent research: the director delegates to its specialists.
pub async fn research<P: LlmProvider + 'static>(
    runner: &Runner<P>,
    sandbox: &SandboxClient,
    model: &str,
    task: &str,
    quiet: bool,
) -> Result<()> {
    let director = agents::research_director(sandbox, model, runner);
    run_task(runner, &director, task, quiet).await?;
    Ok(())
}

/// One chart the visualisation workflow asks for.
pub struct ChartRequest {
    pub name: &'static str,
    pub question: &'static str,
    pub chart_type: &'static str,
    pub analysis_description: &'static str,
    pub output_filename: &'static str,
}

impl ChartRequest {
    pub fn prompt(&self) -> String {
        format!(
            "{}\n\nUse the analyze_data_and_create_chart tool with:\n- chart_type: \"{}\"\n- analysis_description: \"{}\"\n- output_filename: \"{}\"",
            self.question, self.chart_type, self.analysis_description, self.output_filename
        )
    }
}

pub const CHARTS: [ChartRequest; 4] = [
    ChartRequest {
        name: "Revenue by Category",
        question: "Create a bar chart of total revenue by product category. Show the exact revenue for each category.",
        chart_type: "bar",
        analysis_description: "Total revenue by product category",
        output_filename: "revenue_by_category.png",
    },
    ChartRequest {
        name: "Revenue by Region",
        question: "Show how revenue is distributed across regions. Which region performs best?",
        chart_type: "bar",
        analysis_description: "Total revenue by region",
        output_filename: "revenue_by_region.png",
    },
    ChartRequest {
        name: "Top Products",
        question: "Identify and visualize the top 5 products by revenue.",
        chart_type: "horizontal_bar",
        analysis_description: "Top 5 products by total revenue",
        output_filename: "top_products.png",
    },
    ChartRequest {
        name: "Daily Trend",
        question: "Show the daily revenue trend. Is revenue growing or declining?",
        chart_type: "line",
        analysis_description: "Daily revenue trend over time",
        output_filename: "daily_trend.png",
    },
];

/// Write the sample dataset into `output_dir`, returning its path.
pub fn write_dataset(output_dir: &Path, csv: &str) -> Result<std::path::PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("sales_data.csv");
    std::fs::write(&path, csv)?;
    Ok(path)
}

/// Chart workflow: write the dataset, ask for each chart, download each PNG.
pub async fn visualize<P: LlmProvider>(
    runner: &Runner<P>,
    sandbox: &SandboxClient,
    model: &str,
    output_dir: &Path,
    quiet: bool,
) -> Result<()> {
    let csv = sample_sales_csv();
    let csv_path = write_dataset(output_dir, &csv)?;
    if !quiet {
        println!("📝 Sample sales data written to {}\n", csv_path.display());
    }

    let agent = agents::data_visualizer(sandbox, model, &csv);
    let mut downloaded = Vec::new();

    for (i, chart) in CHARTS.iter().enumerate() {
        if !quiet {
            println!("📈 Visualization {}/{}: {}\n{}", i + 1, CHARTS.len(), chart.name, RULE);
        }
        let result = run_task(runner, &agent, &chart.prompt(), true).await?;
        tracing::debug!(chart = chart.name, turns = result.turns, "chart run finished");

        let remote = format!("/tmp/{}", chart.output_filename);
        let local = output_dir.join(chart.output_filename);
        if transfer::download_file(sandbox, &remote, &local).await {
            let size = std::fs::metadata(&local).map(|m| m.len()).unwrap_or(0);
            if !quiet {
                println!("   ✅ Downloaded to {} ({} bytes)\n", local.display(), size);
            }
            downloaded.push(local);
        } else if !quiet {
            println!("   ❌ Failed to download {}\n", chart.output_filename);
        }
    }

    if !quiet {
        println!("{}\n✅ VISUALIZATION COMPLETE: {}/{} charts downloaded", RULE, downloaded.len(), CHARTS.len());
        println!("   📄 {}", csv_path.display());
        for path in &downloaded {
            println!("   🖼️  {}", path.display());
        }
    }
    Ok(())
}
