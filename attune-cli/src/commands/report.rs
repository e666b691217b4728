//! Rendering of orchestrator step reports.

use attune_sync::{CommandReport, Direction, StepOutcome};

/// Print one `✓ <command> complete` line followed by per-step detail.
pub fn print_report(command: &str, report: &CommandReport) {
    println!("✓ {command} complete");
    for step in &report.steps {
        println!("  {}", describe(step));
    }
}

fn describe(step: &StepOutcome) -> String {
    match step {
        StepOutcome::Fetched { branch } => format!("↓  merged origin/{branch}"),
        StepOutcome::FetchSkippedNoRemote => {
            "-  fetch skipped (no remote configured)".to_string()
        }
        StepOutcome::Mirrored {
            name,
            direction: Direction::Apply,
        } => format!("✎  {name}: runtime updated from store"),
        StepOutcome::Mirrored {
            name,
            direction: Direction::Capture,
        } => format!("✎  {name}: store updated from runtime"),
        StepOutcome::MirrorSkipped { name, .. } => {
            format!("-  {name}: empty source, destination left untouched")
        }
        StepOutcome::Installed {
            name,
            backup: Some(backup),
        } => format!("✎  {name}: installed (backup at {})", backup.display()),
        StepOutcome::Installed { name, backup: None } => format!("✎  {name}: installed"),
        StepOutcome::InstallSkipped { name } => format!("-  {name}: not in store, skipped"),
        StepOutcome::Captured { name } => format!("✎  {name}: captured into store"),
        StepOutcome::CaptureSkipped { name } => {
            format!("-  {name}: no runtime file, skipped")
        }
        StepOutcome::Pushed { branch } => format!("↑  pushed origin/{branch}"),
        StepOutcome::PublishSkippedNoRemote => {
            "-  publish skipped (no remote configured); committed locally".to_string()
        }
        StepOutcome::NothingToPublish => "·  nothing to publish".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_and_effects_read_differently() {
        let effect = describe(&StepOutcome::Mirrored {
            name: "skills",
            direction: Direction::Apply,
        });
        let skip = describe(&StepOutcome::MirrorSkipped {
            name: "skills",
            direction: Direction::Apply,
        });
        assert!(effect.starts_with('✎'));
        assert!(skip.starts_with('-'));
    }

    #[test]
    fn publish_outcomes_name_their_condition() {
        assert!(describe(&StepOutcome::NothingToPublish).contains("nothing to publish"));
        assert!(
            describe(&StepOutcome::PublishSkippedNoRemote).contains("no remote configured")
        );
        assert!(describe(&StepOutcome::Pushed { branch: "main" }).contains("origin/main"));
    }
}
