//! API shape tests — validates that serialized response payloads carry the
//! field names clients depend on, using the real domain types rather than a
//! live HTTP server.

use compmon_analysis::{compare, extract, score_analysis, CompetitorAnalysis};
use compmon_store::AnalysisStore;

fn sample_analysis() -> CompetitorAnalysis {
    CompetitorAnalysis {
        strengths: vec!["Realtime collaboration on vector design".to_string()],
        weaknesses: vec!["High price for individuals".to_string()],
        unique_offers: vec!["Browser-first editor".to_string()],
        opportunities: vec!["Weak offline story".to_string()],
        recommendations: vec!["Differentiate on AI features".to_string()],
        summary: "A dominant collaborative design platform with AI features.".to_string(),
    }
}

/// Score payloads expose camelCase fields with a lowercase threat level.
#[test]
fn test_score_shape() {
    let score = score_analysis(&sample_analysis());
    let json = serde_json::to_value(&score).unwrap();

    assert!(json["design"].is_number());
    assert!(json["animation"].is_number());
    assert!(json["features"].is_number());
    assert!(json["ux"].is_number());
    assert!(json["overall"].is_number());
    assert!(json["threatLevel"].is_string());
    assert!(json["recommendations"].is_array());

    let level = json["threatLevel"].as_str().unwrap();
    assert!(["low", "medium", "high"].contains(&level));
}

/// Stored records serialize with the analysis nested under camelCase keys.
#[test]
fn test_analysis_record_shape() {
    let dir = tempfile::tempdir().unwrap();
    let store = AnalysisStore::open(dir.path()).unwrap();

    let analysis = sample_analysis();
    let score = score_analysis(&analysis);
    let id = store
        .add_analysis("Figma", "Figma is a collaborative design tool", &analysis, Some(&score))
        .unwrap();

    let record = store.get_analysis(id).unwrap().unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["id"], id);
    assert_eq!(json["competitorName"], "Figma");
    assert!(json["sourceText"].is_string());
    assert!(json["analysis"]["strengths"].is_array());
    assert!(json["analysis"]["unique_offers"].is_array());
    assert!(json["score"]["overall"].is_number());
    assert!(json["contentHash"].is_string());
    assert!(json["createdAt"].is_number());
}

/// History entries carry only the listing columns.
#[test]
fn test_history_entry_shape() {
    let dir = tempfile::tempdir().unwrap();
    let store = AnalysisStore::open(dir.path()).unwrap();

    let analysis = sample_analysis();
    let score = score_analysis(&analysis);
    store
        .add_analysis("Figma", "some competitor text", &analysis, Some(&score))
        .unwrap();

    let history = store.list_history(10).unwrap();
    let json = serde_json::to_value(&history).unwrap();
    let entry = &json[0];

    assert!(entry["id"].is_number());
    assert_eq!(entry["competitorName"], "Figma");
    assert!(entry["threatLevel"].is_string());
    assert!(entry["createdAt"].is_number());
    assert!(entry.get("sourceText").is_none());
}

/// Comparison payloads expose ranking, histogram, and market block.
#[test]
fn test_comparison_shape() {
    let analysis = sample_analysis();
    let score = score_analysis(&analysis);
    let entries = vec![
        ("Figma".to_string(), score.clone()),
        ("Sketch".to_string(), score),
    ];

    let comparison = compare(&entries);
    let json = serde_json::to_value(&comparison).unwrap();

    assert!(json["ranking"].is_array());
    assert!(json["ranking"][0]["name"].is_string());
    assert!(json["ranking"][0]["score"].is_number());
    assert!(json["threatLevels"]["high"].is_number());
    assert!(json["threatLevels"]["medium"].is_number());
    assert!(json["threatLevels"]["low"].is_number());
    assert!(json["market"]["avgDesign"].is_number());
    assert!(json["market"]["maturity"].is_string());
}

/// The discover pipeline end to end: markup reply in, scored competitors out.
#[test]
fn test_discover_pipeline_shape() {
    let reply = "- **Figma** – Collaborative vector design tool with AI features [1].\n\
                 - **Sketch** – Mac-only design tool lacking AI.\n";
    let mut competitors = extract(reply);
    for competitor in &mut competitors {
        competitor.score = Some(compmon_analysis::score_text(&competitor.description, ""));
    }

    let json = serde_json::to_value(&competitors).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["name"], "Figma");
    assert!(json[0]["description"].as_str().unwrap().len() >= 10);
    assert!(json[0]["score"]["features"].as_f64().unwrap() > 0.0);
    assert!(
        json[0]["score"]["features"].as_f64().unwrap()
            > json[1]["score"]["features"].as_f64().unwrap()
    );
}
