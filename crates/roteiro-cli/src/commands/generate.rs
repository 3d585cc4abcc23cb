use super::utils;
use anyhow::{Context, Result};
use roteiro_core::content::GenerationRequest;

pub async fn run(topic: String, platforms: Vec<String>, requester: String) -> Result<()> {
    let usecase = utils::build_usecase().await?;

    let request = GenerationRequest {
        topic,
        platforms,
        requester_id: requester,
        context_sample: None,
    };

    let outcome = usecase
        .generate_and_store(request)
        .await
        .context("generation failed")?;

    println!("Stored record: {}", outcome.record_id);
    for result in outcome.results {
        println!(
            "\n=== {} (Pontuação Viral: {}) ===",
            result.platform, result.content.aggregate_score
        );
        println!("{}", result.content.script_body);
        if !result.content.analysis_items.is_empty() {
            println!();
            for item in result.content.analysis_items {
                println!("- {} ({}/10): {}", item.title, item.score, item.description);
            }
        }
    }

    Ok(())
}
