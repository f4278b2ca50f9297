//! Pure formatting functions for UI output.
//!
//! `format_*` functions build text and are unit-tested; `display_*`
//! functions only print.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::branch::rules;
use crate::validate::BranchReport;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print remediation text under an error.
pub fn display_hint(hint: &str) {
    eprintln!();
    for line in hint.lines() {
        eprintln!("{}", line);
    }
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Merge rules for a recognized branch, one bullet per policy line.
pub fn format_branch_report(report: &BranchReport) -> String {
    let mut out = format!("Merge rules for {} branches:\n", report.class);
    for line in report.policy.describe() {
        out.push_str(&format!("  - {}\n", line));
    }
    out
}

pub fn display_branch_report(report: &BranchReport) {
    display_success(&format!("Valid {} branch: {}", report.class, report.branch));
    println!("\n{}", style(format_branch_report(report).trim_end()).bold());
    if let Some(warning) = &report.warning {
        println!();
        display_boundary_warning(warning);
    }
}

/// Every accepted branch shape followed by one example of each.
pub fn format_valid_patterns() -> String {
    let mut out = String::from("Valid branch patterns:\n");
    for rule in rules() {
        out.push_str(&format!("  - {}\n", rule.shape));
    }
    out.push_str("\nExamples:\n");
    for rule in rules().iter().filter(|r| r.example != r.class.as_str()) {
        out.push_str(&format!("  - {}\n", rule.example));
    }
    out
}

pub fn display_invalid_branch(branch: &str) {
    display_error(&format!("Invalid branch name: {}", branch));
    eprintln!("\n{}", format_valid_patterns().trim_end());
}

/// Print a JSON document under a heading.
pub fn display_json(heading: &str, json: &str) {
    display_success(heading);
    println!("{}", json.trim_end());
}

/// Steps to take after a descriptor has been prepared.
pub fn format_next_steps(version: &str, branch: &str, remote: &str) -> Vec<String> {
    vec![
        "Review and test your changes".to_string(),
        format!("Push the branch: git push -u {} {}", remote, branch),
        "Create a Pull Request to main branch".to_string(),
        format!(
            "After PR approval and merge, version {} will be released",
            version
        ),
    ]
}

pub fn display_next_steps(version: &str, branch: &str, remote: &str) {
    println!("\n{}", style("Next steps:").bold());
    for (i, step) in format_next_steps(version, branch, remote).iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!(
        "\n{} RC builds will be automatically created when you push to this branch",
        style("→").yellow()
    );
}
