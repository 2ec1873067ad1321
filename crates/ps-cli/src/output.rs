use ps_publish::PublishReceipt;

use crate::cli::OutputFormat;

/// Render a receipt in the requested format.
pub fn render(receipt: &PublishReceipt, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
        OutputFormat::Text => Ok(render_text(receipt)),
    }
}

/// Print a receipt to stdout.
pub fn output(receipt: &PublishReceipt, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(receipt, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_text(receipt: &PublishReceipt) -> String {
    let mapping = if receipt.mapping_uploaded { "yes" } else { "no" };
    let version_code = receipt.version_code.to_string();
    [
        ("package", receipt.package_id.as_str()),
        ("edit", receipt.edit_id.as_str()),
        ("track", receipt.track.as_str()),
        ("version code", version_code.as_str()),
        ("sha1", receipt.sha1.as_str()),
        ("status", receipt.status.as_str()),
        ("language", receipt.language.as_str()),
        ("mapping", mapping),
    ]
    .iter()
    .map(|(key, value)| format!("{key:<13}{value}"))
    .collect::<Vec<_>>()
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use ps_core::PublishStatus;

    fn receipt() -> PublishReceipt {
        PublishReceipt {
            package_id: "com.example.app".into(),
            edit_id: "0123".into(),
            track: "beta".into(),
            version_code: 42,
            sha1: "abc123".into(),
            status: PublishStatus::InProgress,
            language: "en-US".into(),
            mapping_uploaded: true,
        }
    }

    #[test]
    fn text_lists_one_field_per_line() {
        let text = render(&receipt(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "package      com.example.app\n\
             edit         0123\n\
             track        beta\n\
             version code 42\n\
             sha1         abc123\n\
             status       inProgress\n\
             language     en-US\n\
             mapping      yes"
        );
    }

    #[test]
    fn json_uses_wire_status_spelling() {
        let json = render(&receipt(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "inProgress");
        assert_eq!(value["version_code"], 42);
        assert_eq!(value["mapping_uploaded"], true);
    }
}
