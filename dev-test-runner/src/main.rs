//! End-to-end smoke harness for the layout builder: realistic documents in,
//! outlines out, plus a handful of documents that must be rejected.

use anyhow::{Context, ensure};
use dynlayout::{ExpectedKind, build, outline};
use serde_json::{Value, json};

/// Layout documents of the kind the builder sees in practice:
/// - explicit row grouping next to wrapper objects and lone tagged controls
/// - null spacer items
/// - scaling/padding attributes on wrappers
fn realistic_samples() -> Vec<(&'static str, Value, ExpectedKind)> {
    vec![
        (
            "login form",
            json!({
                "rows": [
                    [
                        {"$type": "Label", "text": "User"},
                        {"$type": "TextBox", "placeholder": "name"},
                    ],
                    [
                        {"$type": "Label", "text": "Password"},
                        {"$type": "TextBox"},
                    ],
                    {"control": {"$type": "CheckBox", "text": "Remember me"}},
                    [null, {"$type": "Button", "text": "Sign in"}],
                ],
                "padding": 8,
                "spacing": {"width": 4, "height": 4},
            }),
            ExpectedKind::Table,
        ),
        (
            "toolbar row",
            json!([
                {"$type": "Button", "text": "Open"},
                {"$type": "Button", "text": "Save"},
                null,
                {"$type": "ImageView", "resource": "logo"},
            ]),
            ExpectedKind::Row,
        ),
        (
            "settings grid",
            json!([
                [
                    {"$type": "Label", "text": "Volume"},
                    {"$type": "Slider", "min": 0, "max": 100, "value": 30},
                ],
                [
                    {"$type": "Label", "text": "Mute"},
                    {"$type": "CheckBox"},
                ],
            ]),
            ExpectedKind::Table,
        ),
    ]
}

fn rejection_samples() -> Vec<(&'static str, Value, ExpectedKind)> {
    vec![
        (
            "uninferable object",
            json!({"text": "x"}),
            ExpectedKind::Control,
        ),
        (
            "unknown type",
            json!({"$type": "Carousel"}),
            ExpectedKind::Control,
        ),
        (
            "table in an item slot",
            json!([[[{"$type": "Button"}]]]),
            ExpectedKind::Table,
        ),
        ("scalar root", json!(42), ExpectedKind::Table),
    ]
}

fn main() -> anyhow::Result<()> {
    // 1) build the good samples and show their outlines
    for (name, document, expected) in realistic_samples() {
        let node = build(&document, expected)
            .with_context(|| format!("sample {name:?} should build"))?
            .context("sample roots are non-null")?;
        eprintln!("✅ {name}");
        println!("{}", serde_json::to_string_pretty(&outline(&node))?);
    }

    // 2) every rejection sample must fail
    for (name, document, expected) in rejection_samples() {
        match build(&document, expected) {
            Err(error) => eprintln!("✅ {name}: {error}"),
            Ok(_) => anyhow::bail!("sample {name:?} should have been rejected"),
        }
    }

    // 3) spot-check the normalized shape
    let node = build(&json!({"control": {"$type": "Button"}}), ExpectedKind::Row)?
        .context("wrapper roots are non-null")?;
    ensure!(
        outline(&node) == json!({"kind": "row", "items": [{"kind": "control", "type": "Button"}]}),
        "singleton normalization drifted: {}",
        outline(&node)
    );

    eprintln!("all samples behaved");
    Ok(())
}
