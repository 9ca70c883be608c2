use colored::*;
use serde::Serialize;

use crate::api::types::{
    ApiResponse, ClusterPayload, DeleteReport, DeleteStatus, DetectReport, ListEntry,
};
use crate::common::format::{format_count, format_size, format_size_colored, format_timestamp};
use crate::duplicates::resolver::{self, DeleteStrategy};

/// Print any operation response as pretty JSON
pub fn print_json<T: Serialize>(response: &ApiResponse<T>) {
    match serde_json::to_string_pretty(response) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: {}", e),
    }
}

/// Print a listing in human-readable format
pub fn print_list(entries: &[ListEntry]) {
    println!();
    if entries.is_empty() {
        println!("  (empty)");
        println!();
        return;
    }

    for entry in entries {
        if entry.kind == "directory" {
            println!("  {}  {}/", "     -".dimmed(), entry.path.blue().bold());
        } else {
            println!(
                "  {:>10}  {}  {}",
                format_size(entry.size),
                format_timestamp(entry.last_modified).dimmed(),
                entry.path
            );
        }
    }
    println!();
    let files = entries.iter().filter(|e| e.kind == "file").count();
    let total: u64 = entries.iter().map(|e| e.size).sum();
    println!(
        "  {}  •  {}",
        format_count(files).dimmed(),
        format_size_colored(total)
    );
    println!();
}

/// Print a minimal listing: one path per line
pub fn print_list_quiet(entries: &[ListEntry]) {
    for entry in entries {
        println!("{}", entry.path);
    }
}

/// Print duplicate detection results in human-readable format
pub fn print_dup_report(report: &DetectReport, detailed: bool, strategy: Option<DeleteStrategy>) {
    println!();
    println!("  {} CloudSweep Duplicate Report", "🔍");
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "  {} clusters  •  {}  •  methods: {}",
        report.total_groups,
        format_count(report.total_duplicate_files),
        report.methods.join(", ").cyan()
    );
    println!("{}", "─".repeat(60).dimmed());
    println!();

    if report.duplicates.is_empty() {
        println!("  {} No duplicates found!", "✨");
        println!();
        return;
    }

    for (idx, cluster) in report.duplicates.iter().enumerate() {
        print_cluster(idx, cluster, detailed, strategy);
    }
    println!();
}

fn print_cluster(idx: usize, cluster: &ClusterPayload, detailed: bool, strategy: Option<DeleteStrategy>) {
    let label = match cluster.match_type.as_str() {
        "content" => "content".green(),
        "filename" => "filename".yellow(),
        "size" => "size".cyan(),
        "dimensions" => "dimensions".magenta(),
        _ => "combined".red().bold(),
    };

    let mut annotation = String::new();
    if let Some(dims) = cluster.dimensions {
        annotation = format!("  {}", dims);
    } else if let Some(size) = cluster.size {
        annotation = format!("  ~{}", format_size(size));
    }
    if let Some(ref criteria) = cluster.matched_criteria {
        annotation = format!("  [{}]", criteria.join(" + "));
    }

    println!(
        "  {} {} ({}){}",
        format!("#{:<3}", idx + 1).dimmed(),
        label,
        format_count(cluster.files.len()),
        annotation.dimmed()
    );

    if !detailed && strategy.is_none() {
        return;
    }

    let resolution = strategy.map(|s| resolver::resolve(&cluster.files, s));
    for file in &cluster.files {
        let marker = match resolution {
            Some(ref res) => {
                if res.keep.as_ref().map(|k| &k.path) == Some(&file.path) {
                    "keep".green().to_string()
                } else {
                    "drop".red().to_string()
                }
            }
            None => "•".dimmed().to_string(),
        };
        println!(
            "      {} {}  {}",
            marker,
            file.path,
            format_size(file.size).dimmed()
        );
    }
}

/// Print minimal duplicate output: groups, files, methods
pub fn print_dup_quiet(report: &DetectReport) {
    println!(
        "{}  {}  {}",
        report.total_groups,
        report.total_duplicate_files,
        report.methods.join(",")
    );
}

/// Print a deletion report in human-readable format
pub fn print_delete_report(report: &DeleteReport) {
    println!();
    for outcome in &report.results {
        match outcome.status {
            DeleteStatus::Deleted => println!("  {} deleted {}", "✓".green(), outcome.path),
            DeleteStatus::NotFound => {
                println!("  {} not found {}", "∅".yellow(), outcome.path.dimmed())
            }
            DeleteStatus::Error => println!(
                "  {} {}: {}",
                "✗".red(),
                outcome.path,
                outcome.message.as_deref().unwrap_or("unknown error")
            ),
        }
    }
    println!();
    println!(
        "  {} of {} deleted (strategy: {})",
        report.total_deleted,
        format_count(report.total_processed),
        report.strategy.cyan()
    );
    println!();
}

/// Print minimal deletion output: deleted/processed counts
pub fn print_delete_quiet(report: &DeleteReport) {
    println!("{}  {}", report.total_deleted, report.total_processed);
}
