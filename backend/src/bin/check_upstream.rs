//! Utility binary for verifying the upstream chat-completion setup
//! This is a diagnostic tool, not part of the main application

use emotibot_backend::chat::{ChatTurn, MessageRole};
use emotibot_backend::config::Config;
use emotibot_backend::emotion::prompts::{analysis_user_prompt, ANALYSIS_SYSTEM_PROMPT};
use emotibot_backend::emotion::parse_impact;
use emotibot_backend::llm::{CompletionProvider, OpenAiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    println!("Checking chat-completion upstream...\n");

    let config = Config::from_env();

    // Test 1: API key
    println!("1. Checking for OPENAI_API_KEY...");
    match &config.llm.api_key {
        Some(key) => println!("   ✓ OPENAI_API_KEY is set (length: {} chars)", key.len()),
        None => {
            eprintln!("   ✗ OPENAI_API_KEY not found in environment or .env");
            anyhow::bail!("API key missing");
        }
    }
    println!("   Endpoint: {}/chat/completions", config.llm.base_url);
    println!("   Model:    {}", config.llm.model);

    let client = OpenAiClient::new(config.llm.clone())?;

    // Test 2: plain completion
    println!("\n2. Sending a plain prompt...");
    let messages = [ChatTurn::new(
        MessageRole::User,
        "What is 2+2? Answer in one sentence.",
    )];
    match client.complete(&messages).await {
        Ok(reply) => println!("   ✓ Response: {}", reply),
        Err(e) => {
            eprintln!("   ✗ Request failed: {}", e);
            return Err(e.into());
        }
    }

    // Test 3: emotion analysis contract
    println!("\n3. Checking the emotion analysis reply format...");
    let messages = [
        ChatTurn::new(MessageRole::System, ANALYSIS_SYSTEM_PROMPT),
        ChatTurn::new(
            MessageRole::User,
            analysis_user_prompt("I just got the job, I can't believe it!"),
        ),
    ];
    let reply = client.complete(&messages).await?;
    match parse_impact(&reply) {
        Ok(impact) => println!("   ✓ Parsed impact: {:?}", impact),
        Err(e) => {
            eprintln!("   ✗ Reply did not parse ({}):", e);
            eprintln!("   {}", reply);
        }
    }

    println!("\n✓ All checks completed!");
    Ok(())
}
