//! End-of-run summary rendering.

use crate::provision::RunReport;

use super::icons::StatusKind;
use super::progress::format_duration;
use super::theme::RigupTheme;

/// Render the summary box. `plain` uses bracketed labels instead of icons.
pub fn summary_lines(report: &RunReport, theme: &RigupTheme, plain: bool) -> Vec<String> {
    let b = &theme.border;
    let mut lines = Vec::with_capacity(report.items().len() + 6);

    lines.push(String::new());
    lines.push(format!(
        "  {} {}",
        b.apply_to("┌─"),
        b.apply_to("Summary ──────────────────────────")
    ));

    for item in report.items() {
        let kind = StatusKind::from(item.outcome);
        let icon = if plain {
            kind.bracketed().to_string()
        } else {
            kind.styled(theme)
        };
        let mut right = item.outcome.label().to_string();
        if let Some(d) = item.duration {
            right.push_str(&format!(" · {}", format_duration(d)));
        }
        if let Some(detail) = &item.detail {
            right.push_str(&format!(" · {}", detail));
        }
        lines.push(format!(
            "  {} {} {:<24} {}",
            b.apply_to("│"),
            icon,
            item.name,
            theme.dim.apply_to(right)
        ));
    }

    lines.push(format!(
        "  {}",
        b.apply_to("├────────────────────────────────────")
    ));
    lines.push(format!(
        "  {} Total: {} · {} installed · {} present · {} failed",
        b.apply_to("│"),
        theme.duration.apply_to(format_duration(report.elapsed())),
        report.count(crate::provision::ItemOutcome::Installed),
        report.count(crate::provision::ItemOutcome::AlreadyPresent),
        report.count(crate::provision::ItemOutcome::Failed),
    ));
    lines.push(format!(
        "  {}",
        b.apply_to("└────────────────────────────────────")
    ));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provision::ItemOutcome;
    use std::time::Duration;

    fn report() -> RunReport {
        let mut report = RunReport::new();
        report.record("oh-my-zsh", ItemOutcome::AlreadyPresent, None, None);
        report.record(
            "docker",
            ItemOutcome::Installed,
            Some(Duration::from_millis(1500)),
            None,
        );
        report.record("nvm", ItemOutcome::Failed, None, Some("timed out after 60s".into()));
        report
    }

    #[test]
    fn every_item_has_a_row() {
        let lines = summary_lines(&report(), &RigupTheme::plain(), true);
        for name in ["oh-my-zsh", "docker", "nvm"] {
            assert!(lines.iter().any(|l| l.contains(name)), "missing {}", name);
        }
    }

    #[test]
    fn rows_carry_outcome_and_detail() {
        let lines = summary_lines(&report(), &RigupTheme::plain(), true);
        let nvm = lines.iter().find(|l| l.contains("nvm")).unwrap();
        assert!(nvm.contains("[FAIL]"));
        assert!(nvm.contains("timed out after 60s"));

        let docker = lines.iter().find(|l| l.contains("docker")).unwrap();
        assert!(docker.contains("1.5s"));
    }

    #[test]
    fn footer_counts() {
        let lines = summary_lines(&report(), &RigupTheme::plain(), false);
        let footer = lines.iter().find(|l| l.contains("Total:")).unwrap();
        assert!(footer.contains("1 installed"));
        assert!(footer.contains("1 present"));
        assert!(footer.contains("1 failed"));
    }
}
