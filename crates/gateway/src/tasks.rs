//! Task-specific prompt builders and completion post-processing.
//!
//! Each job type makes exactly one completion call with a fixed token
//! budget and normalises the model text into the project's output payload.
//! JSON recovery is best-effort: unparseable responses degrade to a raw
//! text fallback instead of failing the job.

use serde_json::{json, Value};

use atelier_core::extract::{extract_html, extract_json, ModelPayload};

use crate::client::{ChatMessage, GatewayError, ModelGateway};

/// Token budget for prototype generation.
const PROTOTYPE_MAX_TOKENS: u32 = 8000;

/// Token budget for data analysis.
const ANALYSIS_MAX_TOKENS: u32 = 4000;

/// Token budget for code review.
const REVIEW_MAX_TOKENS: u32 = 4000;

/// Token budget for design generation (multiple variants per call).
const DESIGN_MAX_TOKENS: u32 = 12000;

/// Rows per table included in the analysis prompt.
const MAX_ROWS_PER_TABLE: usize = 100;

/// Generate an interactive HTML prototype from a free-text requirement.
///
/// Output payload: `{"html": ..., "requirement": ...}`.
pub async fn generate_prototype(
    gateway: &dyn ModelGateway,
    requirement: &str,
) -> Result<Value, GatewayError> {
    let prompt = format!(
        "You are a senior front-end engineer. Based on the following product \
         requirement, produce a complete, interactive HTML prototype.\n\n\
         Requirement:\n{requirement}\n\n\
         Constraints:\n\
         1. Produce a single HTML document including CSS and JavaScript.\n\
         2. The page must run directly in a browser.\n\
         3. Modern, clean visual design.\n\
         4. Include basic interactions (clicks, inputs).\n\
         5. Responsive layout using modern CSS (Grid, Flexbox).\n\n\
         Return only the HTML code, with no surrounding explanation."
    );

    let text = gateway
        .complete(&[ChatMessage::user(prompt)], PROTOTYPE_MAX_TOKENS)
        .await?;

    Ok(json!({
        "html": extract_html(&text),
        "requirement": requirement,
    }))
}

/// Analyse tabular data (already decoded from its spreadsheet source).
///
/// Output payload: `{"data": <truncated tables>, "analysis": ...}`, where
/// `analysis` is the model's JSON or a `{"raw": ...}` fallback.
pub async fn analyze_data(
    gateway: &dyn ModelGateway,
    tables: &Value,
) -> Result<Value, GatewayError> {
    let data = truncate_tables(tables);
    let summary = serde_json::to_string_pretty(&data).unwrap_or_default();

    let prompt = format!(
        "You are a professional data analyst. Analyse the following tabular \
         data and provide:\n\n\
         1. A data overview (volume, fields, value types).\n\
         2. Key insights (patterns, anomalies, trends).\n\
         3. A data quality assessment (missing values, outliers).\n\
         4. Business recommendations grounded in the data.\n\n\
         Data:\n{summary}\n\n\
         Respond in JSON with this shape:\n\
         {{\n\
           \"summary\": {{\"totalSheets\": n, \"totalRows\": n, \"columns\": [\"...\"]}},\n\
           \"insights\": [{{\"type\": \"anomaly|trend|pattern\", \"description\": \"...\", \"severity\": \"high|medium|low\"}}],\n\
           \"quality\": {{\"missingValues\": n, \"anomalies\": n}},\n\
           \"recommendations\": [\"...\"]\n\
         }}"
    );

    let text = gateway
        .complete(&[ChatMessage::user(prompt)], ANALYSIS_MAX_TOKENS)
        .await?;

    Ok(json!({
        "data": data,
        "analysis": ModelPayload::from_text(&text).into_value(),
    }))
}

/// Review source code for architecture, security, performance, quality,
/// and logic issues.
///
/// Output payload: `{"review": ..., "code": ...}`, where `review` is the
/// model's JSON or a `{"raw": ...}` fallback.
pub async fn review_code(gateway: &dyn ModelGateway, code: &str) -> Result<Value, GatewayError> {
    let prompt = format!(
        "You are an experienced code reviewer. Review the following code for:\n\n\
         1. Architecture (structure, design patterns).\n\
         2. Security (injection, XSS, unsafe handling).\n\
         3. Performance (algorithmic cost, resource use).\n\
         4. Quality (readability, maintainability, best practice).\n\
         5. Logic (errors, unhandled edge cases).\n\n\
         Code:\n```\n{code}\n```\n\n\
         Respond in JSON with this shape:\n\
         {{\n\
           \"summary\": {{\"totalIssues\": n, \"critical\": n, \"warning\": n, \"info\": n}},\n\
           \"issues\": [{{\"type\": \"architecture|security|performance|quality|logic\", \
         \"severity\": \"critical|warning|info\", \"title\": \"...\", \"description\": \"...\", \
         \"line\": n, \"suggestion\": \"...\"}}]\n\
         }}"
    );

    let text = gateway
        .complete(&[ChatMessage::user(prompt)], REVIEW_MAX_TOKENS)
        .await?;

    Ok(json!({
        "review": ModelPayload::from_text(&text).into_value(),
        "code": code,
    }))
}

/// Generate design mock-ups as HTML/CSS, at least two stylistic variants.
///
/// The variant count is requested of the model, not validated here. When
/// the response carries no `designs` array, the raw text becomes a single
/// fallback design.
///
/// Output payload: `{"designs": [...], "requirement": ..., "brandSettings": ...}`.
pub async fn generate_design(
    gateway: &dyn ModelGateway,
    requirement: &str,
    brand_settings: &Value,
) -> Result<Value, GatewayError> {
    let brand = serde_json::to_string_pretty(brand_settings).unwrap_or_default();

    let prompt = format!(
        "You are a UI/UX designer. Based on the following design brief, \
         produce design mock-ups as HTML/CSS.\n\n\
         Brief:\n{requirement}\n\n\
         Brand settings:\n{brand}\n\n\
         Constraints:\n\
         1. Complete HTML/CSS per design.\n\
         2. Respect the brand settings (colors, fonts, spacing).\n\
         3. Modern, clean, responsive.\n\
         4. Produce at least two distinct stylistic variants.\n\n\
         Respond in JSON with this shape:\n\
         {{\n\
           \"designs\": [{{\"id\": 1, \"title\": \"...\", \"description\": \"...\", \
         \"html\": \"...\", \"compliant\": true}}]\n\
         }}"
    );

    let text = gateway
        .complete(&[ChatMessage::user(prompt)], DESIGN_MAX_TOKENS)
        .await?;

    let designs = match extract_json(&text) {
        Some(value) => value.get("designs").cloned().unwrap_or_else(|| json!([])),
        None => json!([{
            "id": 1,
            "title": "Design proposal",
            "description": requirement,
            "html": text.trim(),
            "compliant": true,
        }]),
    };

    Ok(json!({
        "designs": designs,
        "requirement": requirement,
        "brandSettings": brand_settings,
    }))
}

/// Cap each table at [`MAX_ROWS_PER_TABLE`] rows before it enters the
/// prompt. Non-table shapes pass through unchanged.
fn truncate_tables(tables: &Value) -> Value {
    match tables {
        Value::Object(sheets) => Value::Object(
            sheets
                .iter()
                .map(|(name, rows)| (name.clone(), truncate_rows(rows)))
                .collect(),
        ),
        Value::Array(_) => truncate_rows(tables),
        other => other.clone(),
    }
}

fn truncate_rows(rows: &Value) -> Value {
    match rows {
        Value::Array(items) if items.len() > MAX_ROWS_PER_TABLE => {
            Value::Array(items[..MAX_ROWS_PER_TABLE].to_vec())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;

    /// Gateway double answering every call with a fixed text.
    struct Replying(&'static str);

    #[async_trait]
    impl ModelGateway for Replying {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, GatewayError> {
            Ok(self.0.to_string())
        }
    }

    /// Gateway double failing every call with a provider error.
    struct Failing(&'static str);

    #[async_trait]
    impl ModelGateway for Failing {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _max_tokens: u32,
        ) -> Result<String, GatewayError> {
            Err(GatewayError::Provider {
                status: 500,
                message: self.0.to_string(),
            })
        }
    }

    #[tokio::test]
    async fn prototype_strips_fenced_html() {
        let gateway = Replying("```html\n<div>x</div>\n```");
        let output = generate_prototype(&gateway, "a landing page for a bakery")
            .await
            .unwrap();
        assert_eq!(output["html"], "<div>x</div>");
        assert_eq!(output["requirement"], "a landing page for a bakery");
    }

    #[tokio::test]
    async fn review_falls_back_to_raw_text() {
        let gateway = Replying("I could not produce structured output.");
        let output = review_code(&gateway, "fn main() {}").await.unwrap();
        assert_eq!(
            output["review"]["raw"],
            "I could not produce structured output."
        );
    }

    #[tokio::test]
    async fn review_keeps_parsed_json() {
        let gateway =
            Replying("```json\n{\"summary\": {\"totalIssues\": 0}, \"issues\": []}\n```");
        let output = review_code(&gateway, "fn main() {}").await.unwrap();
        assert_eq!(output["review"]["summary"]["totalIssues"], 0);
    }

    #[tokio::test]
    async fn design_wraps_non_json_reply_as_single_fallback() {
        let gateway = Replying("<section>hero</section>");
        let output = generate_design(&gateway, "a hero section", &json!({}))
            .await
            .unwrap();
        let designs = output["designs"].as_array().unwrap();
        assert_eq!(designs.len(), 1);
        assert_eq!(designs[0]["html"], "<section>hero</section>");
        assert_eq!(designs[0]["compliant"], true);
    }

    #[tokio::test]
    async fn design_with_missing_designs_key_yields_empty_list() {
        let gateway = Replying("{\"variants\": []}");
        let output = generate_design(&gateway, "a hero section", &json!({}))
            .await
            .unwrap();
        assert_eq!(output["designs"], json!([]));
    }

    #[tokio::test]
    async fn analysis_truncates_oversized_tables() {
        let rows: Vec<Value> = (0..250).map(|i| json!({ "row": i })).collect();
        let tables = json!({ "Sheet1": rows, "Sheet2": [{"a": 1}] });

        let gateway = Replying("{\"summary\": {}}");
        let output = analyze_data(&gateway, &tables).await.unwrap();

        assert_eq!(output["data"]["Sheet1"].as_array().unwrap().len(), 100);
        assert_eq!(output["data"]["Sheet2"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn gateway_errors_propagate_unchanged() {
        let gateway = Failing("rate limited");
        let err = generate_prototype(&gateway, "anything at all")
            .await
            .unwrap_err();
        assert_matches!(err, GatewayError::Provider { status: 500, ref message } if message == "rate limited");
    }
}
