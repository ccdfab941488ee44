//! PDF generation via `printpdf`. One A4 page, builtin fonts, sectioned
//! lists mirroring the analysis schema.

use std::io::BufWriter;

use printpdf::*;

use compmon_analysis::{CompetitorAnalysis, Score};
use compmon_core::{Error, Result};

const WRAP_COLUMN: usize = 90;

/// Render one stored analysis as PDF bytes.
pub fn render_analysis_pdf(
    competitor_name: &str,
    created_at_millis: i64,
    analysis: &CompetitorAnalysis,
    score: Option<&Score>,
) -> Result<Vec<u8>> {
    let title = format!("Competitor analysis: {competitor_name}");
    let (doc, page1, layer1) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Report(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Report(format!("PDF font error: {e}")))?;

    let mut y = Mm(280.0);

    layer.use_text(&title, 14.0, Mm(20.0), y, &bold);
    y -= Mm(6.0);
    layer.use_text(
        format!("Date: {}", format_date(created_at_millis)),
        9.0,
        Mm(20.0),
        y,
        &font,
    );
    y -= Mm(10.0);

    if let Some(score) = score {
        layer.use_text("SCORES:", 11.0, Mm(20.0), y, &bold);
        y -= Mm(6.0);
        let lines = [
            format!("  Design: {:.2}", score.design),
            format!("  Animation: {:.2}", score.animation),
            format!("  Features: {:.2}", score.features),
            format!("  UX: {:.2}", score.ux),
            format!(
                "  Overall: {:.2} (threat level: {})",
                score.overall, score.threat_level
            ),
        ];
        for line in lines {
            layer.use_text(&line, 9.0, Mm(25.0), y, &font);
            y -= Mm(4.5);
        }
        y -= Mm(4.0);
    }

    let sections: [(&str, &[String]); 5] = [
        ("STRENGTHS:", &analysis.strengths),
        ("WEAKNESSES:", &analysis.weaknesses),
        ("UNIQUE OFFERS:", &analysis.unique_offers),
        ("OPPORTUNITIES:", &analysis.opportunities),
        ("RECOMMENDATIONS:", &analysis.recommendations),
    ];
    for (heading, items) in sections {
        if items.is_empty() {
            continue;
        }
        layer.use_text(heading, 11.0, Mm(20.0), y, &bold);
        y -= Mm(6.0);
        for item in items {
            for line in wrap_text(&format!("  - {item}"), WRAP_COLUMN) {
                layer.use_text(&line, 9.0, Mm(25.0), y, &font);
                y -= Mm(4.5);
            }
        }
        y -= Mm(4.0);
    }

    if !analysis.summary.is_empty() {
        layer.use_text("SUMMARY:", 11.0, Mm(20.0), y, &bold);
        y -= Mm(6.0);
        for line in wrap_text(&analysis.summary, WRAP_COLUMN) {
            layer.use_text(&line, 9.0, Mm(25.0), y, &font);
            y -= Mm(4.5);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)
        .map_err(|e| Error::Report(format!("PDF save error: {e}")))?;
    buf.into_inner()
        .map_err(|e| Error::Report(format!("PDF buffer error: {e}")))
}

fn format_date(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.len() + word.len() + 1 > max_chars && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use compmon_analysis::score_analysis;

    #[test]
    fn test_renders_pdf_bytes() {
        let analysis = CompetitorAnalysis {
            strengths: vec!["Realtime collaboration across design teams".to_string()],
            weaknesses: vec!["High price for small studios".to_string()],
            unique_offers: vec!["Browser-first editing".to_string()],
            opportunities: vec!["Offline support gap".to_string()],
            recommendations: vec!["Invest in AI-assisted layout".to_string()],
            summary: "A dominant collaborative design platform.".to_string(),
        };
        let score = score_analysis(&analysis);

        let bytes =
            render_analysis_pdf("Figma", 1_700_000_000_000, &analysis, Some(&score)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_renders_without_score() {
        let bytes =
            render_analysis_pdf("Sketch", 0, &CompetitorAnalysis::default(), None).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_text_respects_column() {
        let wrapped = wrap_text(&"word ".repeat(50), 20);
        assert!(wrapped.len() > 1);
        assert!(wrapped.iter().all(|l| l.len() <= 20));
    }
}
