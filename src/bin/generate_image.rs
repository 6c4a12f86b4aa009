// Standalone Gemini image generation example.
//
// Usage:
//   generate-image [--output <path>] [prompt words...]
//
// Writes a single image file and exits. It shares the Gemini client with the
// bot but nothing else: no Discord, no allow-list.

use anyhow::{bail, Context};
use gemini_discord_bot::core::ai::ImageService;
use gemini_discord_bot::infra::ai::GeminiClient;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_PROMPT: &str = "Create a picture of a cat wearing a space helmet on the moon";
const DEFAULT_OUTPUT: &str = "generated-image.png";

struct Args {
    prompt: String,
    output: PathBuf,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<Args> {
    let mut output = PathBuf::from(DEFAULT_OUTPUT);
    let mut words = Vec::new();

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => {
                let Some(path) = args.next() else {
                    bail!("{} needs a file path", arg);
                };
                output = PathBuf::from(path);
            }
            _ => words.push(arg),
        }
    }

    let prompt = if words.is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        words.join(" ")
    };

    Ok(Args { prompt, output })
}

async fn run() -> anyhow::Result<bool> {
    let args = parse_args(std::env::args().skip(1))?;
    let api_key = std::env::var("GEMINI_API_KEY")
        .context("Missing GEMINI_API_KEY environment variable!")?;

    let service = ImageService::new(GeminiClient::new(api_key));
    let saved = service
        .generate_to_file(&args.prompt, &args.output)
        .await
        .context("Error generating image")?;

    if saved {
        tracing::info!("Image saved to {}", args.output.display());
    }
    Ok(saved)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    dotenv::dotenv().ok();

    match run().await {
        Ok(true) => {
            tracing::info!("Image generation successful");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            tracing::warn!("Image generation failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_when_no_arguments() {
        let parsed = parse_args(Vec::new()).unwrap();
        assert_eq!(parsed.prompt, DEFAULT_PROMPT);
        assert_eq!(parsed.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn prompt_words_and_output_are_collected() {
        let parsed = parse_args(args(&["a", "red", "--output", "out.png", "fox"])).unwrap();
        assert_eq!(parsed.prompt, "a red fox");
        assert_eq!(parsed.output, PathBuf::from("out.png"));
    }

    #[test]
    fn output_flag_requires_a_path() {
        assert!(parse_args(args(&["-o"])).is_err());
    }
}
