use super::utils;
use anyhow::{Context, Result, bail};

pub async fn run(id: String, instruction: String) -> Result<()> {
    let usecase = utils::build_usecase().await?;

    let content = match usecase.refine_record(&id, &instruction).await {
        Ok(content) => content,
        Err(err) if err.is_refinement_validation() => {
            bail!("could not apply that change, try rephrasing")
        }
        Err(err) => return Err(err).context("refinement failed"),
    };

    println!("Updated record: {id}");
    println!("Pontuação Viral: {}", content.aggregate_score);
    println!("{}", content.script_body);

    Ok(())
}
