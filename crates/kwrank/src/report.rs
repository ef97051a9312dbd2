//! Output rendering: a canonical JSON analysis document and a Markdown
//! checklist for working keywords into a resume by hand.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::errors::AnalysisError;
use crate::models::analysis::{Analysis, Cluster, InjectionAction, InjectionMatch, InjectionOutcome};
use crate::models::candidate::{Category, KnockoutKind, KnockoutMatch};

/// The canonical analysis document: knockout requirements first (required
/// before preferred), then ranked skills, then run metadata.
pub fn analysis_document(analysis: &Analysis, generated_at: DateTime<Utc>) -> Value {
    let knockouts: Vec<Value> = ordered_knockouts(analysis)
        .into_iter()
        .map(|(cluster, outcome)| cluster_entry(cluster, outcome))
        .collect();
    let skills: Vec<Value> = skill_entries(analysis)
        .into_iter()
        .map(|(cluster, outcome)| cluster_entry(cluster, outcome))
        .collect();

    json!({
        "knockout_requirements": knockouts,
        "skills_ranked": skills,
        "metadata": {
            "counts": analysis.counts,
            "generated_at": generated_at.to_rfc3339(),
        }
    })
}

/// Renders the Markdown injection checklist.
pub fn render_checklist(analysis: &Analysis, generated_at: DateTime<Utc>) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push("# Keyword Injection Checklist".to_string());
    lines.push(String::new());
    lines.push(
        "Use this checklist during resume optimization to ensure critical keywords are included."
            .to_string(),
    );
    lines.push(String::new());

    lines.push("## 🎯 Knockout Requirements".to_string());
    lines.push("*These are critical qualifications that must be addressed in your resume.*".to_string());
    lines.push(String::new());
    let knockouts = ordered_knockouts(analysis);
    if knockouts.is_empty() {
        lines.push("- No knockout requirements identified".to_string());
    } else {
        for (cluster, outcome) in &knockouts {
            lines.push(checklist_line(cluster));
            push_injection_lines(&mut lines, *outcome);
        }
    }
    lines.push(String::new());

    let skills = skill_entries(analysis);
    lines.push(format!("## 🏆 Top {} Skills", skills.len()));
    lines.push("*These are the highest-priority skills to emphasize in your resume.*".to_string());
    lines.push(String::new());
    for (cluster, outcome) in &skills {
        lines.push(checklist_line(cluster));
        push_injection_lines(&mut lines, *outcome);
    }

    lines.push(String::new());
    lines.push("## 📝 Usage Notes".to_string());
    lines.push(String::new());
    lines.push(
        "- **Knockout Requirements**: Ensure these appear prominently in your experience section"
            .to_string(),
    );
    lines.push("- **Skills**: Work these naturally into job descriptions and achievements".to_string());
    lines.push("- **Aliases**: Use variety - don't repeat the same keyword phrase".to_string());
    lines.push(
        "- **No suitable point**: Add a new bullet rather than forcing a weak match".to_string(),
    );
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(format!(
        "*Generated {}*",
        generated_at.format("%Y-%m-%d %H:%M UTC")
    ));
    lines.join("\n")
}

/// Writes the pretty-printed analysis document, timestamped now.
pub fn save_analysis(analysis: &Analysis, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
    let document = analysis_document(analysis, Utc::now());
    let rendered =
        serde_json::to_string_pretty(&document).context("serializing analysis document")?;
    fs::write(path, rendered)?;
    Ok(())
}

/// Writes the Markdown checklist, timestamped now.
pub fn save_checklist(analysis: &Analysis, path: impl AsRef<Path>) -> Result<(), AnalysisError> {
    fs::write(path, render_checklist(analysis, Utc::now()))?;
    Ok(())
}

/// Knockout clusters with their injection outcomes, required before
/// preferred. The score ordering within each group is preserved.
fn ordered_knockouts(analysis: &Analysis) -> Vec<(&Cluster, Option<&InjectionOutcome>)> {
    let mut entries: Vec<(&Cluster, Option<&InjectionOutcome>)> = analysis
        .clusters
        .iter()
        .enumerate()
        .filter(|(_, cluster)| cluster.category == Category::Knockout)
        .map(|(index, cluster)| (cluster, outcome_for(analysis, index)))
        .collect();
    entries.sort_by_key(|(cluster, _)| match knockout_of(cluster).map(|k| k.kind) {
        Some(KnockoutKind::Preferred) => 1u8,
        _ => 0,
    });
    entries
}

fn skill_entries(analysis: &Analysis) -> Vec<(&Cluster, Option<&InjectionOutcome>)> {
    analysis
        .clusters
        .iter()
        .enumerate()
        .filter(|(_, cluster)| cluster.category != Category::Knockout)
        .map(|(index, cluster)| (cluster, outcome_for(analysis, index)))
        .collect()
}

// Injection outcomes run parallel to the cluster list.
fn outcome_for(analysis: &Analysis, index: usize) -> Option<&InjectionOutcome> {
    analysis.injections.as_ref().and_then(|outcomes| outcomes.get(index))
}

fn knockout_of(cluster: &Cluster) -> Option<&KnockoutMatch> {
    cluster.members.iter().find_map(|member| member.knockout.as_ref())
}

fn cluster_entry(cluster: &Cluster, outcome: Option<&InjectionOutcome>) -> Value {
    let knockout = knockout_of(cluster);
    let mut entry = json!({
        "kw": cluster.alias,
        "score": cluster.score(),
        "category": cluster.category.as_str(),
        "knockout_type": knockout.map(|k| k.kind),
        "knockout_family": knockout.map(|k| k.family),
        "matched_fragment": knockout.map(|k| k.fragment.clone()),
        "aliases": cluster.alternate_texts(),
        "members": cluster.members.len(),
    });
    if let Some(rep) = cluster.representative() {
        entry["role"] = json!(rep.role.as_str());
        entry["source"] = json!(rep.source);
        entry["frequency"] = json!(rep.frequency_score);
        entry["section"] = json!(rep.section_boost);
        entry["role_weight"] = json!(rep.role_weight);
        entry["buzzword_penalty"] = json!(rep.buzzword_penalty);
    }
    if let Some(outcome) = outcome {
        entry["injection"] = json!(outcome);
    }
    entry
}

fn checklist_line(cluster: &Cluster) -> String {
    let mut line = format!("- [ ] **{}** (score: {})", cluster.alias, cluster.score());
    let aliases = cluster.alternate_texts();
    if !aliases.is_empty() {
        line.push_str(&format!(" (aliases: {})", aliases.join(", ")));
    }
    if knockout_of(cluster).map(|k| k.kind) == Some(KnockoutKind::Preferred) {
        line.push_str(" (preferred)");
    }
    match cluster.category {
        Category::Supporting => line.push_str(" *(supporting)*"),
        Category::CultureFit => line.push_str(" *(culture fit)*"),
        _ => {}
    }
    if cluster
        .representative()
        .map_or(false, |rep| rep.buzzword_penalty > 0.0)
    {
        line.push_str(" ⚠️ *buzzword*");
    }
    line
}

fn push_injection_lines(lines: &mut Vec<String>, outcome: Option<&InjectionOutcome>) {
    let Some(outcome) = outcome else {
        return;
    };
    match outcome {
        InjectionOutcome::NoSuitablePoint { .. } => {
            lines.push("  [ ] 💡 no suitable injection point - add a new bullet".to_string());
        }
        InjectionOutcome::Suggestion { matches, .. } => {
            lines.push(String::new());
            for point in matches {
                lines.push(format!(
                    "  [ ] ({}) {} \"{}\" {}",
                    point.similarity,
                    action_glyph(point.action),
                    truncate_sentence(&point.sentence),
                    target_label(point),
                ));
            }
            lines.push(String::new());
        }
    }
}

fn action_glyph(action: InjectionAction) -> &'static str {
    match action {
        InjectionAction::AlreadyCovered => "✅",
        InjectionAction::AddPhrase => "🟠",
        InjectionAction::AddBullet => "💡",
    }
}

/// Keeps sentences findable but short: 60 chars max, ellipsized.
fn truncate_sentence(sentence: &str) -> String {
    if sentence.chars().count() <= 60 {
        return sentence.to_string();
    }
    let head: String = sentence.chars().take(57).collect();
    format!("{head}...")
}

/// `[Employer]` or `[Employer, sentence 2]` / `[Employer, bullet 3]`, so a
/// reader can find the spot without opening the JSON.
fn target_label(point: &InjectionMatch) -> String {
    let employer = match point.context.split(" - ").next() {
        Some(first) if !first.is_empty() => first,
        _ => point.context.as_str(),
    };
    match location_note(&point.location) {
        Some(note) => format!("[{employer}, {note}]"),
        None => format!("[{employer}]"),
    }
}

fn location_note(location: &str) -> Option<String> {
    if let Some(start) = location.find('(') {
        return Some(location[start + 1..].trim_end_matches(')').to_string());
    }
    if let Some(start) = location.find("highlights[") {
        let rest = &location[start + "highlights[".len()..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if let Ok(index) = digits.parse::<usize>() {
            // 1-indexed for humans.
            return Some(format!("bullet {}", index + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::AnalysisCounts;
    use crate::models::candidate::{
        ClassifiedCandidate, PatternFamily, Provenance, Role,
    };
    use chrono::TimeZone;

    fn member(
        text: &str,
        category: Category,
        score: f64,
        knockout: Option<KnockoutMatch>,
    ) -> ClassifiedCandidate {
        ClassifiedCandidate {
            text: text.to_string(),
            role: Role::Core,
            source: Provenance::LlmExtraction,
            frequency_score: 0.1,
            section_boost: 0.8,
            role_weight: 1.2,
            buzzword_penalty: 0.0,
            composite_score: score,
            category,
            knockout,
        }
    }

    fn knockout_cluster(alias: &str, score: f64, kind: KnockoutKind) -> Cluster {
        let knockout = KnockoutMatch {
            family: PatternFamily::Years,
            fragment: "5+ years".to_string(),
            kind,
        };
        Cluster {
            alias: alias.to_string(),
            category: Category::Knockout,
            members: vec![member(alias, Category::Knockout, score, Some(knockout))],
        }
    }

    fn skill_cluster(alias: &str, score: f64, extra: &[&str]) -> Cluster {
        let mut members = vec![member(alias, Category::TopSkill, score, None)];
        for text in extra {
            members.push(member(text, Category::TopSkill, score / 2.0, None));
        }
        Cluster {
            alias: alias.to_string(),
            category: Category::TopSkill,
            members,
        }
    }

    fn stamp() -> DateTime<Utc> {
        match Utc.with_ymd_and_hms(2025, 1, 15, 12, 30, 0) {
            chrono::LocalResult::Single(stamp) => stamp,
            _ => panic!("fixed timestamp must be valid"),
        }
    }

    fn fixture() -> Analysis {
        Analysis {
            clusters: vec![
                knockout_cluster("5+ years preferred", 0.9, KnockoutKind::Preferred),
                knockout_cluster("7+ years of product", 0.4, KnockoutKind::Required),
                skill_cluster("product management", 0.8, &["management of product"]),
            ],
            injections: None,
            counts: AnalysisCounts {
                candidates: 4,
                dropped_buzzwords: 0,
                dropped_degree: 0,
                clusters: 3,
                knockouts: 2,
                top_skills: 1,
                supporting: 0,
                culture_fit: 0,
            },
        }
    }

    #[test]
    fn test_document_orders_required_before_preferred() {
        let doc = analysis_document(&fixture(), stamp());
        assert_eq!(doc["knockout_requirements"][0]["kw"], json!("7+ years of product"));
        assert_eq!(doc["knockout_requirements"][0]["knockout_type"], json!("required"));
        assert_eq!(doc["knockout_requirements"][1]["knockout_type"], json!("preferred"));
        assert_eq!(doc["skills_ranked"][0]["kw"], json!("product management"));
        assert_eq!(doc["skills_ranked"][0]["aliases"], json!(["management of product"]));
        assert_eq!(doc["skills_ranked"][0]["category"], json!("top_skill"));
        assert_eq!(doc["metadata"]["counts"]["knockouts"], json!(2));
        assert_eq!(
            doc["metadata"]["generated_at"],
            json!("2025-01-15T12:30:00+00:00")
        );
    }

    #[test]
    fn test_document_carries_injection_outcomes() {
        let mut analysis = fixture();
        analysis.injections = Some(vec![
            InjectionOutcome::NoSuitablePoint {
                alias: "5+ years preferred".to_string(),
            },
            InjectionOutcome::NoSuitablePoint {
                alias: "7+ years of product".to_string(),
            },
            InjectionOutcome::Suggestion {
                alias: "product management".to_string(),
                matches: vec![InjectionMatch {
                    sentence: "Led product management for two teams".to_string(),
                    location: "work[0].highlights[1]".to_string(),
                    context: "Acme - Senior PM".to_string(),
                    section: "highlights".to_string(),
                    similarity: 0.82,
                    action: InjectionAction::AlreadyCovered,
                }],
            },
        ]);
        let doc = analysis_document(&analysis, stamp());
        assert_eq!(doc["skills_ranked"][0]["injection"]["status"], json!("suggestion"));
        assert_eq!(
            doc["skills_ranked"][0]["injection"]["matches"][0]["similarity"],
            json!(0.82)
        );
        assert_eq!(
            doc["knockout_requirements"][0]["injection"]["status"],
            json!("no_suitable_point")
        );
    }

    #[test]
    fn test_checklist_sections_glyphs_and_labels() {
        let mut analysis = fixture();
        analysis.injections = Some(vec![
            InjectionOutcome::NoSuitablePoint {
                alias: "5+ years preferred".to_string(),
            },
            InjectionOutcome::NoSuitablePoint {
                alias: "7+ years of product".to_string(),
            },
            InjectionOutcome::Suggestion {
                alias: "product management".to_string(),
                matches: vec![InjectionMatch {
                    sentence: "Led product management for two teams".to_string(),
                    location: "work[0].highlights[1]".to_string(),
                    context: "Acme - Senior PM".to_string(),
                    section: "highlights".to_string(),
                    similarity: 0.82,
                    action: InjectionAction::AlreadyCovered,
                }],
            },
        ]);
        let checklist = render_checklist(&analysis, stamp());

        assert!(checklist.starts_with("# Keyword Injection Checklist"));
        assert!(checklist.contains("## 🎯 Knockout Requirements"));
        assert!(checklist.contains("## 🏆 Top 1 Skills"));
        let required = checklist
            .find("**7+ years of product**")
            .unwrap_or(usize::MAX);
        let preferred = checklist
            .find("**5+ years preferred**")
            .unwrap_or(usize::MAX);
        assert!(required < preferred, "required knockouts list first");
        assert!(checklist.contains("(preferred)"));
        assert!(checklist.contains("(aliases: management of product)"));
        assert!(checklist.contains("✅ \"Led product management for two teams\" [Acme, bullet 2]"));
        assert!(checklist.contains("💡 no suitable injection point"));
        assert!(checklist.contains("## 📝 Usage Notes"));
        assert!(checklist.contains("*Generated 2025-01-15 12:30 UTC*"));
    }

    #[test]
    fn test_checklist_without_knockouts_says_so() {
        let analysis = Analysis {
            clusters: vec![skill_cluster("platform strategy", 0.7, &[])],
            injections: None,
            counts: AnalysisCounts::default(),
        };
        let checklist = render_checklist(&analysis, stamp());
        assert!(checklist.contains("- No knockout requirements identified"));
    }

    #[test]
    fn test_truncation_keeps_sixty_chars() {
        let exact: String = "a".repeat(60);
        assert_eq!(truncate_sentence(&exact), exact);
        let long: String = "b".repeat(70);
        let rendered = truncate_sentence(&long);
        assert_eq!(rendered.chars().count(), 60);
        assert!(rendered.ends_with("..."));
    }

    #[test]
    fn test_target_label_variants() {
        let mut point = InjectionMatch {
            sentence: String::new(),
            location: "basics.summary (sentence 2)".to_string(),
            context: "Executive Summary".to_string(),
            section: "basics_summary".to_string(),
            similarity: 0.5,
            action: InjectionAction::AddPhrase,
        };
        assert_eq!(target_label(&point), "[Executive Summary, sentence 2]");

        point.location = "work[1].highlights[0]".to_string();
        point.context = "Acme - PM".to_string();
        assert_eq!(target_label(&point), "[Acme, bullet 1]");

        point.location = "text".to_string();
        point.context = "Resume".to_string();
        assert_eq!(target_label(&point), "[Resume]");
    }
}
