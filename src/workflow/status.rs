//! Workflow status step.
//!
//! Status evaluates every step's check without side effects: no commands
//! run, no prompts are shown, no files are written.
use super::context::Project;
use super::steps::{SkipFlag, StepState, STEPS};
use crate::cli::StatusArgs;
use crate::integrations::{Integration, RegistrySource};
use anyhow::{Context, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub(crate) struct StatusSummary {
    pub(crate) project_root: String,
    pub(crate) integrations: IntegrationSummary,
    pub(crate) steps: Vec<StepStatus>,
}

#[derive(Debug, Serialize)]
pub(crate) struct IntegrationSummary {
    pub(crate) source: RegistrySource,
    pub(crate) present: Vec<Integration>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StepStatus {
    pub(crate) id: &'static str,
    pub(crate) title: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) skip_flag: Option<SkipFlag>,
    pub(crate) state: StepState,
}

/// Build the status summary for a loaded project.
pub(crate) fn status_summary(project: &Project) -> Result<StatusSummary> {
    let mut steps = Vec::with_capacity(STEPS.len());
    for step in STEPS {
        let state = (step.check)(project).with_context(|| format!("check step {}", step.id))?;
        steps.push(StepStatus {
            id: step.id,
            title: step.title,
            skip_flag: step.skip,
            state,
        });
    }
    let registry = project.integrations()?;
    Ok(StatusSummary {
        project_root: project.paths.root().display().to_string(),
        integrations: IntegrationSummary {
            source: registry.source(),
            present: registry.present().collect(),
        },
        steps,
    })
}

pub fn run_status(args: &StatusArgs) -> Result<()> {
    let project = Project::load(&args.project)?;
    let summary = status_summary(&project)?;

    if args.json {
        let text = serde_json::to_string_pretty(&summary).context("serialize status")?;
        println!("{text}");
        return Ok(());
    }

    println!("project: {}", summary.project_root);
    let present = project.integrations()?;
    let labels: Vec<&str> = present.present().map(Integration::label).collect();
    if labels.is_empty() {
        println!("integrations: none");
    } else {
        println!("integrations: {}", labels.join(", "));
    }
    for step in &summary.steps {
        let state = match step.state {
            StepState::Applied => "applied",
            StepState::Pending => "pending",
            StepState::Always => "runs every install",
            StepState::NotApplicable => "not applicable",
        };
        match step.skip_flag {
            Some(flag) => println!("  {:<18} {} (skip with {})", step.id, state, flag.flag()),
            None => println!("  {:<18} {}", step.id, state),
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
