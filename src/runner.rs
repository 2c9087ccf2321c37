// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Structs, traits, and functions for defining and running an ordered set of
//! pipeline steps.

use std::{borrow::Cow, collections::HashMap, io::Write};

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

const PROGRESS_TICK_INTERVAL: std::time::Duration =
    std::time::Duration::from_millis(100);

type StepFn = dyn Fn(&mut Context, &Ui) -> anyhow::Result<()>;

/// A step in a scripted procedure.
pub struct ScriptStep {
    /// A descriptive label for this procedure step.
    label: &'static str,

    /// The function to execute to run this procedure step.
    func: Box<StepFn>,

    /// A list of commands this step expects to launch via
    /// `[std::process::Command]`. The script runner uses these to check for
    /// missing dependencies before running the script.
    prereq_commands: Vec<&'static str>,
}

impl ScriptStep {
    pub fn new(
        label: &'static str,
        func: impl Fn(&mut Context, &Ui) -> anyhow::Result<()> + 'static,
    ) -> Self {
        Self { label, func: Box::new(func), prereq_commands: Vec::new() }
    }

    pub fn with_prereqs(
        label: &'static str,
        func: impl Fn(&mut Context, &Ui) -> anyhow::Result<()> + 'static,
        commands: &[&'static str],
    ) -> Self {
        Self { label, func: Box::new(func), prereq_commands: commands.to_vec() }
    }

    pub fn prereq_commands(&self) -> &[&'static str] {
        self.prereq_commands.as_slice()
    }
}

/// Implemented by objects that can be used as scripts.
pub trait Script {
    /// Yields a slice of steps that can be executed to run this script.
    fn steps(&self) -> &[ScriptStep];

    /// Describes the script's inputs and outputs to the operator before it
    /// runs.
    fn print_configuration(&self, w: &mut dyn Write) -> std::io::Result<()>;

    /// Checks that every command the script's steps expect to launch can be
    /// found on the PATH, returning one message per missing command.
    fn check_prerequisites(&self) -> Result<(), Vec<String>> {
        let mut missing = Vec::new();
        for step in self.steps() {
            for command in step.prereq_commands() {
                if which::which(command).is_err() {
                    missing.push(format!(
                        "command `{command}` was not found on the PATH"
                    ));
                }
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }

    /// Yields a `HashMap` that contains key-value pairs that should be
    /// inserted into the script's `[Context]` prior to running it.
    fn initial_context(&self) -> HashMap<String, String>;
}

/// Runs a script, pretty-printing its various labels and the outcomes of each
/// step. Steps run strictly in order; the first failure aborts the remainder
/// of the script.
pub fn run_script(script: Box<dyn Script>, interactive: bool) -> anyhow::Result<()> {
    script.print_configuration(&mut std::io::stdout())?;
    println!();

    if let Err(missing) = script.check_prerequisites() {
        let s = "Some prerequisites were not satisfied:".bold();
        println!("{}", s);

        for unsatisfied in missing.iter() {
            println!("  {}", unsatisfied);
        }

        println!();
        anyhow::bail!("some script prerequisites weren't satisfied");
    }

    let mut ctx = Context::with_vars(script.initial_context());
    let multi = interactive.then(MultiProgress::new);

    let bars: Vec<ProgressBar> = script
        .steps()
        .iter()
        .map(|step| {
            let bar = match &multi {
                Some(multi) => multi.add(ProgressBar::new_spinner()),
                None => ProgressBar::hidden(),
            };

            bar.set_message(step.label);
            bar.set_style(ProgressStyle::with_template("  {msg:.dim}").unwrap());
            bar.tick();
            bar
        })
        .collect();

    for (step, bar) in script.steps().iter().zip(bars) {
        if interactive {
            bar.set_style(ProgressStyle::default_spinner());
            bar.enable_steady_tick(PROGRESS_TICK_INTERVAL);
        } else {
            println!("{}", step.label);
        }

        let ui = Ui { label: step.label, bar: bar.clone() };
        match (step.func)(&mut ctx, &ui) {
            Ok(()) => {
                bar.set_message(step.label);
                bar.set_style(
                    ProgressStyle::with_template("✓ {msg:.green}").unwrap(),
                );
                bar.finish();
            }
            Err(e) => {
                bar.set_style(
                    ProgressStyle::with_template("⚠ {msg:.bold.red}").unwrap(),
                );
                bar.finish();
                return Err(e);
            }
        }
    }

    Ok(())
}

/// A shared script execution context, provided to each step in a running
/// script. Each context contains a key-value store that individual steps can
/// use to pass values to future steps. The `[Script]` trait's
/// `initial_context` function allows each script to populate the store before
/// the script executes.
pub struct Context {
    vars: HashMap<String, String>,
}

impl Context {
    /// Creates a context seeded with `vars`.
    pub fn with_vars(vars: HashMap<String, String>) -> Self {
        Self { vars }
    }

    /// Gets the value of the supplied `var`, returning `None` if the value is
    /// not in the store.
    pub fn get_var(&self, var: &str) -> Option<&str> {
        self.vars.get(var).map(|v| v.as_str())
    }

    /// Sets the value of the supplied `var` to `value`, returning the old
    /// value if one was present.
    pub fn set_var(&mut self, var: &str, value: String) -> Option<String> {
        self.vars.insert(var.to_owned(), value)
    }
}

/// A handle the current step can use to report fine-grained progress.
pub struct Ui {
    label: &'static str,
    bar: ProgressBar,
}

impl Ui {
    pub fn set_substep(&self, substep: impl Into<Cow<'static, str>>) {
        self.bar.set_message(format!("{}: {}", self.label, substep.into()));
    }
}

#[cfg(test)]
impl Ui {
    /// A `Ui` with a hidden progress bar, for exercising step functions
    /// outside `run_script`.
    pub(crate) fn detached() -> Self {
        Self { label: "test", bar: ProgressBar::hidden() }
    }
}
