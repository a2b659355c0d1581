/// Instructional prompt asking for exactly three bullets and nothing else.
pub fn summary_prompt(article_text: &str) -> String {
    format!(
        "Summarize this news article in exactly 3 bullet points.\n\
         Each bullet must be one short, clear sentence covering the key facts.\n\
         Start each bullet with \"•\" on its own line.\n\
         Return ONLY the 3 bullets, with no intro and no extra explanation.\n\
         \n\
         Article: {}",
        article_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_article() {
        let prompt = summary_prompt("Markets rally. Stocks closed higher");
        assert!(prompt.starts_with("Summarize this news article in exactly 3 bullet points."));
        assert!(prompt.ends_with("Article: Markets rally. Stocks closed higher"));
        assert!(prompt.contains("\"•\""));
    }
}
