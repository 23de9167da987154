//! Runs policy lookups from the command line and prints each answer as JSON.

use clap::Parser;

use policy_rag::config::Config;
use policy_rag::{LookupParams, PolicyRagTool};

const SAMPLE_QUERIES: [&str; 3] = [
    "What is the equipment limit for interns?",
    "What approvals do I need for $15,000 software?",
    "Can I buy gaming equipment?",
];

#[derive(Parser, Debug)]
#[command(name = "policy-lookup", about = "Query the procurement policy through Langflow")]
struct Cli {
    /// Restrict results to one policy section, e.g. 3.2
    #[arg(long)]
    section: Option<String>,

    /// Number of chunks to retrieve
    #[arg(long = "top-k")]
    top_k: Option<i64>,

    /// Question to ask; the sample questions run when omitted
    query: Vec<String>,
}

impl Cli {
    /// The joined command-line query, or the sample questions when none given.
    fn queries(&self) -> Vec<String> {
        if self.query.is_empty() {
            SAMPLE_QUERIES.iter().map(|q| q.to_string()).collect()
        } else {
            vec![self.query.join(" ")]
        }
    }

    fn params(&self, query: String) -> LookupParams {
        LookupParams {
            query,
            section_filter: self.section.clone(),
            top_k: self.top_k,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let tool = PolicyRagTool::from_config(&config)?;

    for query in cli.queries() {
        let params = cli.params(query);
        let result = tool.execute(&params).await;

        println!("\n{}", "=".repeat(60));
        println!("Query: {}", params.query);
        println!("{}", "=".repeat(60));
        println!("{}", serde_json::to_string_pretty(&result)?);
    }

    Ok(())
}
