//! Output formatting for CLI operations.

use serde_json::json;
use wadlump::{EditResult, Region, WriteResult};

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats the region table
    fn format_regions(&self, regions: &[Region]) -> String;

    /// Formats run statistics
    fn format_stats(&self, edit: &EditResult, write: Option<&WriteResult>) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_regions(&self, regions: &[Region]) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:>10} {:>6} {:>10} {:<8} {:<9} {}\n",
            "Offset", "Index", "Size", "Name", "Kind", "Namespace"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        let mut total_size: u64 = 0;
        for region in regions {
            total_size += region.size;
            output.push_str(&format!(
                "{:>10} {:>6} {:>10} {:<8} {:<9} {}\n",
                region.offset,
                region.index,
                region.size,
                region.label(),
                region.kind,
                region.namespace.join("/")
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{} regions, {} lumps, {} total\n",
            regions.len(),
            regions.iter().filter(|r| r.is_lump()).count(),
            humanize_bytes(total_size)
        ));

        output
    }

    fn format_stats(&self, edit: &EditResult, write: Option<&WriteResult>) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Read {} regions ({} lumps)\n",
            edit.regions_read, edit.lumps_read
        ));
        if edit.has_changes() || edit.regions_touched > 0 {
            output.push_str(&format!(
                "Changed: {} replaced, {} touched, {} deleted, {} added\n",
                edit.regions_replaced, edit.regions_touched, edit.regions_deleted, edit.lumps_added
            ));
        }
        if let Some(write) = write {
            output.push_str(&format!(
                "Wrote {} regions ({} lumps)",
                write.regions_written, write.lumps_written
            ));
            if write.archive_size > 0 {
                output.push_str(&format!(", archive {}", humanize_bytes(write.archive_size)));
            }
            if write.files_written > 0 {
                output.push_str(&format!(", {} files", write.files_written));
            }
            output.push('\n');
        }

        output
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_regions(&self, regions: &[Region]) -> String {
        let items: Vec<_> = regions
            .iter()
            .map(|r| {
                json!({
                    "offset": r.offset,
                    "index": r.index,
                    "size": r.size,
                    "name": r.label(),
                    "kind": r.kind.to_string(),
                    "namespace": r.namespace,
                })
            })
            .collect();

        serde_json::to_string_pretty(&items).unwrap_or_else(|_| "[]".to_string())
    }

    fn format_stats(&self, edit: &EditResult, write: Option<&WriteResult>) -> String {
        let obj = json!({
            "regions_read": edit.regions_read,
            "lumps_read": edit.lumps_read,
            "regions_kept": edit.regions_kept,
            "regions_replaced": edit.regions_replaced,
            "regions_touched": edit.regions_touched,
            "regions_deleted": edit.regions_deleted,
            "lumps_added": edit.lumps_added,
            "written": write.map(|w| json!({
                "regions": w.regions_written,
                "lumps": w.lumps_written,
                "archive_size": w.archive_size,
                "files": w.files_written,
            })),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
