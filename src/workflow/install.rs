//! Workflow install step.
//!
//! Runs every step in order and stops at the first error. Re-running after a
//! fix is the recovery path; steps that already took effect report so and
//! are skipped.
use super::context::{InstallOptions, Project, StepContext};
use super::steps::{SkipFlag, Step, StepState, STEPS};
use crate::cli::InstallArgs;
use crate::process::SystemRunner;
use crate::prompt::{Confirm, DefaultAnswer, LinePrompt};
use anyhow::{Context, Result};
use std::io::IsTerminal;

/// What happened to a step during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepOutcome {
    SkippedByFlag(SkipFlag),
    AlreadyApplied,
    NotApplicable,
    Ran,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StepReport {
    pub(crate) id: &'static str,
    pub(crate) outcome: StepOutcome,
}

const NEXT_STEPS: &[&str] = &[
    "Next steps:",
    "  1. Run: composer analyse (to verify PHPStan setup)",
    "  2. Run: php artisan test (to verify Pest setup)",
    "  3. Run: npm run docs:dev (to view documentation)",
    "  4. Visit: /admin (Filament admin panel)",
    "  5. Visit: /telescope (debugging dashboard)",
    "  6. Visit: /horizon (queue dashboard)",
    "  7. Visit: /pulse (performance dashboard)",
];

/// Run the install command against the project named in `args`.
pub fn run_install(args: &InstallArgs) -> Result<()> {
    let project = Project::load(&args.project)?;
    let options = InstallOptions {
        skip_packages: args.skip_packages,
        skip_pest: args.skip_pest,
        skip_docs: args.skip_docs,
    };

    let mut runner = SystemRunner;
    let mut prompt: Box<dyn Confirm> = if args.no_interaction || !std::io::stdin().is_terminal()
    {
        Box::new(DefaultAnswer)
    } else {
        Box::new(LinePrompt::stdin())
    };

    println!("Installing Laravel Starter Pack...");
    let mut ctx = StepContext::new(&project, options, &mut runner, prompt.as_mut());
    let reports = run_steps(&mut ctx, STEPS)?;
    for report in &reports {
        tracing::debug!(step = report.id, outcome = ?report.outcome, "step outcome");
    }
    let ran = reports
        .iter()
        .filter(|report| report.outcome == StepOutcome::Ran)
        .count();
    tracing::info!(
        ran,
        total = reports.len(),
        warnings = ctx.warnings().len(),
        "install finished"
    );

    println!();
    println!("Laravel Starter Pack installed successfully!");
    println!();
    for line in NEXT_STEPS {
        println!("{line}");
    }
    Ok(())
}

fn skipped_by(step: &Step, options: InstallOptions) -> Option<SkipFlag> {
    step.skip.filter(|flag| match flag {
        SkipFlag::Packages => options.skip_packages,
        SkipFlag::Pest => options.skip_pest,
        SkipFlag::Docs => options.skip_docs,
    })
}

/// Run `steps` in order, returning what happened to each.
pub(crate) fn run_steps(ctx: &mut StepContext<'_>, steps: &[Step]) -> Result<Vec<StepReport>> {
    let mut reports = Vec::with_capacity(steps.len());
    for step in steps {
        let outcome = run_step(ctx, step)?;
        reports.push(StepReport {
            id: step.id,
            outcome,
        });
    }
    Ok(reports)
}

fn run_step(ctx: &mut StepContext<'_>, step: &Step) -> Result<StepOutcome> {
    if let Some(flag) = skipped_by(step, ctx.options) {
        tracing::info!(step = step.id, flag = flag.flag(), "step skipped by flag");
        return Ok(StepOutcome::SkippedByFlag(flag));
    }

    let state = (step.check)(ctx.project).with_context(|| format!("check step {}", step.id))?;
    match state {
        StepState::Applied => {
            tracing::info!(step = step.id, "step already applied");
            println!("{}: already applied", step.title);
            return Ok(StepOutcome::AlreadyApplied);
        }
        StepState::NotApplicable => {
            tracing::info!(step = step.id, "step not applicable");
            return Ok(StepOutcome::NotApplicable);
        }
        StepState::Pending | StepState::Always => {}
    }

    tracing::info!(step = step.id, ?state, "step started");
    (step.apply)(ctx).with_context(|| format!("step {} failed", step.id))?;
    Ok(StepOutcome::Ran)
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
