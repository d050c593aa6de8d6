use clap::{Parser, Subcommand};
use reqwest::redirect::Policy;
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "candy-cli")]
#[command(about = "Command-line client for the candy registry", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8084")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every candy
    List,
    /// Show one candy by id
    Get { id: String },
    /// Show a randomly chosen candy
    Random,
    /// Create a candy
    Create { name: String, kind: String },
    /// Open the admin portal
    Admin {
        #[arg(long, env = "ADMIN_PASSWORD")]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()?;
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::List => {
            let res = client.get(format!("{}/candies", base)).send().await?;
            print_json(res).await?;
        }
        Commands::Get { id } => {
            let res = client.get(format!("{}/candies/{}", base, id)).send().await?;
            print_json(res).await?;
        }
        Commands::Random => {
            let res = client.get(format!("{}/candies/random", base)).send().await?;
            let location = res
                .headers()
                .get(reqwest::header::LOCATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            match location {
                Some(path) if res.status().is_redirection() => {
                    let res = client.get(format!("{}{}", base, path)).send().await?;
                    print_json(res).await?;
                }
                _ => report_error(res).await,
            }
        }
        Commands::Create { name, kind } => {
            let res = client
                .post(format!("{}/candies", base))
                .json(&json!({ "name": name, "kind": kind }))
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Admin { password } => {
            let res = client
                .get(format!("{}/admin", base))
                .basic_auth("admin", Some(password))
                .send()
                .await?;
            if res.status().is_success() {
                println!("{}", res.text().await?);
            } else {
                report_error(res).await;
            }
        }
    }

    Ok(())
}

async fn report_error(res: reqwest::Response) {
    eprintln!("Error: registry returned status {}", res.status());
    if let Ok(text) = res.text().await {
        if !text.is_empty() {
            eprintln!("Response: {}", text);
        }
    }
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    if !res.status().is_success() {
        report_error(res).await;
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
