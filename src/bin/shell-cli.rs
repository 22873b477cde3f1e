use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "shell-cli")]
#[command(about = "Inspect a running guess-shell server", long_about = None)]
struct Cli {
    /// Server URL including the router base path.
    #[arg(short, long, default_value = "http://localhost:5173")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved API_HOST / WEBSOCKET_URL
    Env,
    /// List the route table and which views are loaded
    Routes,
    /// Check the server is up
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Env => {
            let res = client.get(format!("{}/env.json", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Routes => {
            let res = client.get(format!("{}/routes.json", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Health => {
            // healthz is always at the server root
            let mut url = reqwest::Url::parse(base)?;
            url.set_path("/healthz");
            let res = client.get(url).send().await?;
            println!("{}", res.status());
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
