use anyhow::Context;
use clap::Parser;
use small_chat::utils::logger;
use small_chat::RequestHelper;

/// POST a JSON document to a URL and print the decoded reply.
#[derive(Debug, Parser)]
#[command(name = "post-json")]
struct Args {
    #[arg(long)]
    url: String,

    #[arg(long, default_value = "{}", help = "JSON request body")]
    data: String,

    #[arg(long, help = "Base URL for relative --url values")]
    base_url: Option<String>,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let payload: serde_json::Value =
        serde_json::from_str(&args.data).context("--data is not valid JSON")?;

    let mut helper = RequestHelper::new();
    if let Some(base_url) = &args.base_url {
        helper = helper.with_base_url(base_url)?;
    }

    let reply: serde_json::Value = helper
        .api_request(&args.url, &payload)
        .await
        .with_context(|| format!("POST {} failed", args.url))?;

    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
