//! Unit tests for report rendering

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {

    use serde_json::{Value, json};
    use values_checker::model::{Finding, ValidationResult};
    use values_checker::output::{OutputFormat, render};

    fn result(findings: Vec<Finding>) -> ValidationResult {
        ValidationResult {
            values_file: "values.yaml".to_owned(),
            chart_name: "web".to_owned(),
            chart_version: "1.4.0".to_owned(),
            findings,
        }
    }

    fn text(result: &ValidationResult) -> String {
        colored::control::set_override(false);
        let mut out = Vec::new();
        render(result, OutputFormat::Text, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> ValidationResult {
        result(vec![
            Finding::error(3, "image.regsitry", "Unknown key \"image.regsitry\"")
                .with_suggestion(Some("image.registry".to_owned())),
            Finding::error(1, "replicaCount", "Type mismatch at \"replicaCount\": expected int, got string (\"two\")"),
            Finding::warning(7, "oldSetting", "Deprecated key \"oldSetting\" - use newSetting"),
        ])
    }

    #[test]
    fn text_report() {
        let rendered = text(&sample());
        let expected = "Validating values.yaml against web (1.4.0)\n\
            \n\
            ERRORS (2)\n  \
            line 3: Unknown key \"image.regsitry\" (did you mean \"image.registry\"?)\n  \
            line 1: Type mismatch at \"replicaCount\": expected int, got string (\"two\")\n\
            \n\
            WARNINGS (1)\n  \
            line 7: Deprecated key \"oldSetting\" - use newSetting\n\
            \n\
            Summary: 2 error(s), 1 warning(s)\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn text_report_without_findings() {
        let mut clean = result(Vec::new());
        clean.chart_version = String::new();
        assert_eq!(
            text(&clean),
            "Validating values.yaml against web\n\nNo issues found.\n"
        );
    }

    #[test]
    fn text_report_strips_escape_sequences() {
        let hostile = result(vec![Finding::error(
            1,
            "x",
            "Unknown key \"\u{1b}[2J\u{1b}]0;pwned\u{7}x\u{0}\"",
        )]);
        let rendered = text(&hostile);
        assert!(rendered.contains("line 1: Unknown key \"x\""));
        assert!(!rendered.contains('\u{1b}'));
        assert!(!rendered.contains('\u{0}'));
    }

    #[test]
    fn text_report_strips_single_character_csi() {
        let hostile = result(vec![Finding::error(1, "x", "Unknown key \"\u{9b}2Jx\u{7f}\"")]);
        let rendered = text(&hostile);
        assert!(rendered.contains("line 1: Unknown key \"2Jx\""));
        assert!(!rendered.contains('\u{9b}'));
        assert!(!rendered.contains('\u{7f}'));
    }

    #[test]
    fn json_report() {
        let mut out = Vec::new();
        render(&sample(), OutputFormat::Json, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(
            parsed,
            json!({
                "valuesFile": "values.yaml",
                "chartName": "web",
                "chartVersion": "1.4.0",
                "errors": [
                    {
                        "line": 3,
                        "keyPath": "image.regsitry",
                        "message": "Unknown key \"image.regsitry\"",
                        "suggestion": "image.registry"
                    },
                    {
                        "line": 1,
                        "keyPath": "replicaCount",
                        "message": "Type mismatch at \"replicaCount\": expected int, got string (\"two\")"
                    }
                ],
                "warnings": [
                    {
                        "line": 7,
                        "keyPath": "oldSetting",
                        "message": "Deprecated key \"oldSetting\" - use newSetting"
                    }
                ],
                "errorCount": 2,
                "warningCount": 1
            })
        );
        assert!(out.ends_with(b"}\n"));
    }

    #[test]
    fn json_report_has_empty_arrays() {
        let mut out = Vec::new();
        render(&result(Vec::new()), OutputFormat::Json, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["errors"], json!([]));
        assert_eq!(parsed["warnings"], json!([]));
        assert_eq!(parsed["errorCount"], json!(0));
    }
}
