//! One-shot exec mode: runs one line through the pipeline and prints it.

use std::path::PathBuf;

use anyhow::Result;
use nlterm_core::config::Config;
use nlterm_core::providers::{GeminiClient, GeminiConfig};
use nlterm_core::session::exec::execute;
use nlterm_core::session::{
    InputKind, Pipeline, PipelineRequest, Segment, SegmentStyle, Translator, classify,
};

pub async fn run(config: &Config, root: PathBuf, line: &str) -> Result<()> {
    let line = line.trim();
    if line.is_empty() {
        anyhow::bail!("No command provided");
    }

    // Direct commands need no provider credentials; only natural language
    // reaches the translator.
    match classify(line, config.dialect) {
        InputKind::Direct => {
            let outcome = execute(line, &root, config.dialect, config.command_timeout()).await;
            if outcome.is_error {
                eprint!("{}", outcome.text);
            } else {
                print!("{}", outcome.text);
            }
        }
        InputKind::NaturalLanguage => {
            let pipeline = build_pipeline(config)?;
            let outcome = pipeline
                .run(PipelineRequest {
                    seq: 0,
                    line: line.to_string(),
                    cwd: root,
                })
                .await;
            print_segments(&outcome.segments);
        }
    }

    Ok(())
}

fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let gemini = GeminiConfig::from_env(
        config.model.clone(),
        config.max_output_tokens,
        config.providers.gemini.base_url.as_deref(),
        config.providers.gemini.api_key.as_deref(),
    )?;
    let translator = Translator::new(Box::new(GeminiClient::new(gemini)), config.dialect);
    Ok(Pipeline::new(
        translator,
        config.dialect,
        config.command_timeout(),
    ))
}

fn print_segments(segments: &[Segment]) {
    for segment in segments {
        match segment.style {
            SegmentStyle::Error => eprint!("{}", segment.text),
            SegmentStyle::Prompt | SegmentStyle::Input | SegmentStyle::Output => {
                print!("{}", segment.text);
            }
        }
    }
}
