/// Bullet prefix used when stacking per-article summaries into the overview prompt
pub const SUMMARY_BULLET: &str = "• ";

/// Max length for a title or link once placed in a prompt
pub const MAX_PROMPT_FIELD_LEN: usize = 800;

/// Remove control characters and hard-truncate a feed-supplied field before it
/// is interpolated into a prompt
pub fn sanitize_field(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(MAX_PROMPT_FIELD_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Build the per-article request. Only the title and link are sent; the
/// model is expected to look the URL up itself.
pub fn article_prompt(title: &str, url: &str) -> String {
    format!(
        "Summarize the key updates in this article in 2 sentences. Title: {}, URL: {}",
        sanitize_field(title),
        sanitize_field(url)
    )
}

/// Join summaries as a bulleted block, one blank line between bullets
pub fn bullet_block(summaries: &[String]) -> String {
    summaries
        .iter()
        .map(|s| format!("{SUMMARY_BULLET}{s}"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the rollup request over every successful per-article summary
pub fn overview_prompt(summaries: &[String]) -> String {
    format!(
        "Create a concise bullet-point overview summarizing the key AI and tech news from these summaries. \n\
         Format as clean bullet points without titles or links. Focus on the main developments and trends:\n\n\
         {}\n\n\
         Provide a brief, unified overview in bullet points.",
        bullet_block(summaries)
    )
}
