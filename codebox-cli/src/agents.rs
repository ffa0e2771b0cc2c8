//! The agents each command runs.

use codebox_agent::tools::{ChartTool, ExecuteCodeTool, SaveFindingTool, SaveResultTool};
use codebox_agent::{Agent, Runner};
use codebox_llm::LlmProvider;
use codebox_sandbox::SandboxClient;

const TASK_EXECUTOR: &str = r#"You are a helpful AI assistant that executes code to solve problems.

MANDATORY RULE: When you use the execute_code tool, you MUST ALWAYS include print() statements
(or console.log() for JavaScript, echo for Bash) to display results.

Code without print statements will execute but produce NO output, which is useless!

ALWAYS format your code output with:
- print() for all variables you want to show
- print() for all calculations and results
- print() for explanations and labels

Example: If calculating 5 + 5, write:
result = 5 + 5
print(f"The result is: {result}")

NOT just: 5 + 5"#;

const CHAT_ASSISTANT: &str = r#"You are a helpful AI assistant with code execution capabilities.

CRITICAL RULES:
1. When users ask questions that require calculations or data processing, you MUST execute code.
2. ALWAYS use print() statements in your code to display results.
3. DO NOT just return values, you MUST print() them.
4. After executing code, explain the results to the user.

Always execute code and show the output!"#;

const NETWORK_ANALYST: &str = "You are a helpful analyst that can fetch live data from the \
internet and analyze it. Use execute_code_with_network for anything that needs real data, \
and always print() the results.";

const DATA_ANALYST: &str = r#"You are an expert Data Analyst with Python code execution capabilities.

YOUR CAPABILITIES:
- Execute Python code using the execute_python_analysis tool
- Perform data analysis, calculations, and statistical operations
- Work with pandas, numpy and the statistics module

CRITICAL RULES:
1. ALWAYS use print() statements in your code to display results
2. Break complex analysis into logical steps
3. Explain your findings clearly

When analyzing data start with exploratory analysis, calculate relevant statistics,
identify patterns and trends, and provide actionable insights."#;

const STATISTICIAN: &str = r#"You are an expert Statistician specializing in advanced analytics.

YOUR CAPABILITIES:
- Hypothesis testing and statistical inference
- Correlation and regression analysis
- Distribution analysis and probability
- Statistical significance testing

CRITICAL RULES:
1. Use the execute_python_analysis tool for all calculations
2. ALWAYS include print() statements to show results
3. Provide confidence intervals and p-values where relevant

State your hypotheses clearly, show your statistical tests and interpret results in plain language."#;

const REPORT_WRITER: &str = r#"You are an expert Technical Writer specializing in data science reports.

YOUR ROLE:
- Synthesize findings from multiple sources
- Create clear, actionable summaries
- Use bullet points and include specific numbers

Format your reports with:
📊 Key Findings
💡 Insights
🎯 Recommendations"#;

const RESEARCH_DIRECTOR: &str = r#"You are the Research Director coordinating a team of specialists.

YOUR TEAM (available as tools):
- data_analyst_tool: performs data analysis and Python code execution
- statistician_tool: conducts advanced statistical analysis
- report_writer_tool: creates summaries and reports

WORKFLOW:
1. Understand the research question
2. Call data_analyst_tool for exploratory analysis
3. Call statistician_tool for advanced statistical tests
4. Call report_writer_tool to synthesize findings
5. Provide a final comprehensive answer

Use the specialist tools strategically to solve complex problems!"#;

const DATA_VISUALIZER: &str = r#"You are an expert Data Visualization Specialist.

YOUR CAPABILITIES:
- Analyze CSV data and create insightful visualizations
- Generate professional charts using matplotlib and seaborn
- Provide clear analysis summaries with key insights

CRITICAL RULES:
1. Use the analyze_data_and_create_chart tool to create visualizations
2. Each chart should tell a clear story about the data
3. Provide business insights along with visualizations"#;

/// Single agent for `run`: basic or network-enabled code execution.
pub fn task_executor(sandbox: &SandboxClient, model: &str, networking: bool) -> Agent {
    if networking {
        return Agent::new("network_analyst", NETWORK_ANALYST)
            .with_model(model)
            .with_tool(ExecuteCodeTool::with_network(sandbox.clone()));
    }
    Agent::new("task_executor", TASK_EXECUTOR)
        .with_model(model)
        .with_tool(ExecuteCodeTool::basic(sandbox.clone()))
        .with_tool(SaveResultTool)
}

pub fn chat_assistant(sandbox: &SandboxClient, model: &str) -> Agent {
    Agent::new("task_executor", CHAT_ASSISTANT)
        .with_model(model)
        .with_tool(ExecuteCodeTool::basic(sandbox.clone()))
        .with_tool(SaveResultTool)
}

/// The research director with its three specialists attached as tools.
pub fn research_director<P: LlmProvider + 'static>(
    sandbox: &SandboxClient,
    model: &str,
    runner: &Runner<P>,
) -> Agent {
    let data_analyst = Agent::new("data_analyst", DATA_ANALYST)
        .with_model(model)
        .with_tool(ExecuteCodeTool::python_analysis(sandbox.clone()))
        .with_tool(SaveFindingTool);
    let statistician = Agent::new("statistician", STATISTICIAN)
        .with_model(model)
        .with_tool(ExecuteCodeTool::python_analysis(sandbox.clone()))
        .with_tool(SaveFindingTool);
    let report_writer = Agent::new("report_writer", REPORT_WRITER)
        .with_model(model)
        .with_tool(SaveFindingTool);

    Agent::new("research_director", RESEARCH_DIRECTOR)
        .with_model(model)
        .with_tool(data_analyst.as_tool(
            "data_analyst_tool",
            "Expert Data Analyst - performs data analysis and Python code execution",
            runner,
        ))
        .with_tool(statistician.as_tool(
            "statistician_tool",
            "Expert Statistician - conducts advanced statistical analysis",
            runner,
        ))
        .with_tool(report_writer.as_tool(
            "report_writer_tool",
            "Expert Technical Writer - creates summaries and reports",
            runner,
        ))
        .with_tool(SaveFindingTool)
}

pub fn data_visualizer(sandbox: &SandboxClient, model: &str, dataset: &str) -> Agent {
    Agent::new("data_visualizer", DATA_VISUALIZER)
        .with_model(model)
        .with_tool(ChartTool::new(sandbox.clone(), dataset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> SandboxClient {
        SandboxClient::builder()
            .base_url("http://127.0.0.1:9")
            .api_key("k")
            .build()
            .unwrap()
    }

    fn tool_names(agent: &Agent) -> Vec<String> {
        agent.tools().iter().map(|t| t.name().to_string()).collect()
    }

    #[test]
    fn run_agents_pick_the_right_adapter() {
        let basic = task_executor(&sandbox(), "gpt-4o", false);
        assert_eq!(tool_names(&basic), vec!["execute_code", "save_result"]);

        let network = task_executor(&sandbox(), "gpt-4o-mini", true);
        assert_eq!(tool_names(&network), vec!["execute_code_with_network"]);
        assert_eq!(network.model(), "gpt-4o-mini");
    }

    #[test]
    fn research_director_delegates_to_three_specialists() {
        use codebox_llm::{OpenAIProvider, ProviderConfig};

        let runner = Runner::new(OpenAIProvider::new(ProviderConfig::openai("sk")).unwrap());
        let director = research_director(&sandbox(), "gpt-4o", &runner);
        assert_eq!(
            tool_names(&director),
            vec!["data_analyst_tool", "statistician_tool", "report_writer_tool", "save_finding"]
        );
        assert_eq!(director.tools()[0].parameters()["required"][0], "input");
    }

    #[test]
    fn visualizer_has_only_the_chart_tool() {
        let agent = data_visualizer(&sandbox(), "gpt-4o", "a,b\n");
        assert_eq!(tool_names(&agent), vec!["analyze_data_and_create_chart"]);
    }
}
