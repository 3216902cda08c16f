//! Starter spec templates for `drover generate`.

use std::fmt::Write as _;

/// Renders a starter spec for the given plan name.
///
/// The template is a complete, loadable plan with one placeholder task of
/// each evaluation style, ready to edit.
#[must_use]
pub fn starter(name: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Task plan: {name}");
    // The literal keeps its own indentation; YAML nesting depends on it.
    out.push_str(
"# Edit the placeholders below, then run: drover run <this-file>

aider_config:
  model: gpt-4o
  architect_mode: false
  editable_files:
    - src/**/*
  readonly_files: []
  retries: 3
  test_command: cargo test

objective: >
  Describe the overall goal of this plan.

implementation_details: >
  Describe constraints, conventions, and anything the agent should know
  before touching the code.

tasks:
  - name: first-task
    prompt: Describe the first change to make.
    evaluation:
      type: test
  - name: second-task
    prompt: Describe the second change to make.
    evaluation:
      type: command
      command: echo replace-me
      check_prompt: Does the output show the change worked?
",
    );
    out
}
