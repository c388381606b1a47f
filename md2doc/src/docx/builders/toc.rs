use crate::docx::nodes::{Alignment, DocNode, Inline, Paragraph, RunStyle, TabStop, TextRun};
use crate::docx::registry::{BlockBuilder, BuildContext};
use crate::docx::theme::{sizes, spacing};
use crate::error::Result;
use crate::inline::plain_text;
use crate::model::Block;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

static LIST_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-*\d.]+\s*").expect("list marker pattern is valid"));
static PAGE_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s+(\d+)$").expect("page suffix pattern is valid"));

/// Split one entry line into its title and trailing page number.
pub fn split_entry(line: &str) -> Option<(String, String)> {
    let clean = LIST_MARKER.replace(line.trim(), "");
    let clean = clean.trim();
    if clean.is_empty() {
        return None;
    }
    Some(match PAGE_SUFFIX.captures(clean) {
        Some(caps) => (caps[1].to_string(), caps[2].to_string()),
        None => (clean.to_string(), String::new()),
    })
}

/// Manual table of contents: a centered title, then one paragraph per entry
/// with a dotted right tab at the text edge.
pub struct TocBuilder;

#[async_trait]
impl BlockBuilder for TocBuilder {
    async fn build(&self, block: &Block, ctx: &BuildContext<'_>) -> Result<Vec<DocNode>> {
        let mut nodes: Vec<DocNode> = vec![Paragraph::new(vec![TextRun::styled(
            ctx.config.toc_title.as_str(),
            RunStyle::bold().size(sizes::H1),
        )
        .into()])
        .align(Alignment::Center)
        .spacing(spacing::TOC_TITLE)
        .into()];

        let tab = TabStop {
            position: ctx.config.content_width(),
            dot_leader: true,
        };
        for (title, page) in block.content.lines().filter_map(split_entry) {
            let mut entry = Paragraph::new(vec![
                TextRun::plain(plain_text(&title)).into(),
                Inline::Tab,
                TextRun::plain(page).into(),
            ])
            .spacing(spacing::TOC_ENTRY);
            entry.tab_stops.push(tab);
            nodes.push(entry.into());
        }
        Ok(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::builders::test_support::{config, paragraph, services};
    use crate::model::BlockKind;

    #[test]
    fn entries_split_title_and_page() {
        assert_eq!(
            split_entry("- Getting started 12"),
            Some(("Getting started".into(), "12".into()))
        );
        assert_eq!(
            split_entry("  2. Appendix"),
            Some(("Appendix".into(), String::new()))
        );
        assert_eq!(split_entry("- "), None);
    }

    #[tokio::test]
    async fn tab_stop_sits_at_text_edge() {
        let config = config();
        let services = services();
        let ctx = BuildContext::new(&config, &services);
        let block = Block::new(BlockKind::TableOfContents, "- One 1\n- Two 5");
        let nodes = TocBuilder.build(&block, &ctx).await.unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(paragraph(&nodes[0]).text(), "目 錄");
        let entry = paragraph(&nodes[2]);
        assert_eq!(entry.text(), "Two\t5");
        assert_eq!(entry.tab_stops[0].position, 9639 - 2880);
        assert!(entry.tab_stops[0].dot_leader);
    }
}
