use clap::Parser;
use small_chat::core::repl::{next_line_or_interrupt, ChatRepl, LineOutcome};
use small_chat::core::ConfigProvider;
use small_chat::utils::{logger, validation::Validate};
use small_chat::{ChatConfig, ChatError, ChatSession, CliConfig};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = match ChatConfig::resolve(&cli).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    tracing::debug!("Resolved config: base_url={}", config.base_url);

    let mut session = match ChatSession::from_config(&config) {
        Ok(session) => session,
        Err(e) => fail(e),
    };

    match config.credentials() {
        Ok(Some(credentials)) => {
            let outcome = if config.signup {
                session.signup(&credentials).await
            } else {
                session.login(&credentials).await
            };
            if let Err(e) = outcome {
                fail(e);
            }
            println!("Logged in as {}", credentials.username);
        }
        Ok(None) => tracing::warn!("No username configured; the server may refuse chat requests"),
        Err(e) => fail(e),
    }

    let mut repl = ChatRepl::new(session, config.viewport_rows());
    println!("Chat is ready! Type 'exit' or 'quit' to stop.");
    println!("{}", "-".repeat(50));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        // Ctrl-C ends the session the same way as end of input.
        let Some(line) = next_line_or_interrupt(&mut lines, tokio::signal::ctrl_c()).await?
        else {
            println!();
            println!("Goodbye!");
            break;
        };

        let outcome = tokio::select! {
            outcome = repl.handle_line(&line) => outcome,
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Goodbye!");
                break;
            }
        };

        match outcome {
            Ok(LineOutcome::Exit) => {
                println!("Goodbye!");
                break;
            }
            Ok(LineOutcome::Skipped) => continue,
            Ok(LineOutcome::Replied(rows)) => {
                for row in rows {
                    println!("{}", row);
                }
                println!("{}", "-".repeat(50));
            }
            Err(e) => {
                tracing::error!("Message failed ({:?}): {}", e.category(), e);
                println!("An error occurred: {}", e.user_friendly_message());
            }
        }
    }

    Ok(())
}

fn fail(e: ChatError) -> ! {
    tracing::error!("{} (Category: {:?})", e, e.category());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}
