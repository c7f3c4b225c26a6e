use clap::{Parser, Subcommand};
use serde_json::{json, Value};

const TRACE_HEADER: &str = "x-trace-id";

#[derive(Parser)]
#[command(name = "items-cli")]
#[command(about = "Command line client for the Items API", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the service descriptor
    Info,
    /// Check service liveness
    Health,
    /// List all items
    List,
    /// Create a new item
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: f64,
    },
    /// Dump raw Prometheus metrics
    Metrics,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Info => client.get(format!("{}/", base)).send().await?,
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
        Commands::List => client.get(format!("{}/items", base)).send().await?,
        Commands::Create {
            name,
            description,
            price,
        } => {
            client
                .post(format!("{}/items", base))
                .json(&json!({
                    "name": name,
                    "description": description,
                    "price": price,
                }))
                .send()
                .await?
        }
        Commands::Metrics => {
            let res = client.get(format!("{}/metrics", base)).send().await?;
            return print_text(res).await;
        }
    };

    print_json(res).await
}

fn trace_id(res: &reqwest::Response) -> String {
    res.headers()
        .get(TRACE_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string()
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let trace = trace_id(&res);

    if !status.is_success() {
        eprintln!("Error: API returned status {} (trace {})", status, trace);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        std::process::exit(1);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    eprintln!("trace: {}", trace);
    Ok(())
}

async fn print_text(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let trace = trace_id(&res);
    let body = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: API returned status {} (trace {})", status, trace);
        eprintln!("Response: {}", body);
        std::process::exit(1);
    }

    print!("{}", body);
    eprintln!("trace: {}", trace);
    Ok(())
}
