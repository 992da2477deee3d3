use anyhow::{Context, Result};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};

/// Directory under the base folder holding per-batch audit CSVs.
pub const REPORTS_DIR: &str = "__reports";

/// Shorten a text for CSV display: first 80 characters, newlines flattened.
pub fn head(text: &str) -> String {
    text.chars().take(80).collect::<String>().replace('\n', " ")
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn csv_line(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Write a per-batch audit trail to `__reports/<prefix>_<timestamp>.csv`
/// and return its path.
pub fn write_summary_csv(
    base: &Path,
    name_prefix: &str,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<PathBuf> {
    let reports = base.join(REPORTS_DIR);
    fs::create_dir_all(&reports)
        .with_context(|| format!("Failed to create reports dir: {}", reports.display()))?;

    let ts = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = reports.join(format!("{name_prefix}_{ts}.csv"));

    let mut content = String::new();
    let header_row: Vec<String> = headers.iter().map(|h| (*h).to_string()).collect();
    writeln!(content, "{}", csv_line(&header_row)).unwrap();
    for row in rows {
        writeln!(content, "{}", csv_line(row)).unwrap();
    }

    fs::write(&path, content)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_head_truncates_and_flattens() {
        assert_eq!(head("a\nb"), "a b");
        let long = "x".repeat(120);
        assert_eq!(head(&long).len(), 80);
    }

    #[test]
    fn test_csv_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_write_summary_csv() {
        let temp = TempDir::new().unwrap();
        let rows = vec![vec![
            "a.txt".to_string(),
            "changed".to_string(),
            "old, text".to_string(),
            "new".to_string(),
        ]];
        let path = write_summary_csv(
            temp.path(),
            "prefix_suffix",
            &["relative_path", "action", "old_head", "new_head"],
            &rows,
        )
        .unwrap();

        assert!(path.starts_with(temp.path().join(REPORTS_DIR)));
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("relative_path,action,old_head,new_head\n"));
        assert!(content.contains("a.txt,changed,\"old, text\",new"));
    }
}
