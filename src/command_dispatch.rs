//! Purpose: Hold top-level CLI command dispatch for `placard`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Command behavior, output envelopes, and exit code semantics stay unchanged.
//! Invariants: Helpers in `main.rs` remain the source of command business logic.

use super::*;

pub(super) fn dispatch_command(command: Command) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "placard", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Parse { file } => {
            let text = read_input(file.as_deref())?;
            let (element, warnings) = element_report(&text)?;
            emit_json(json!({
                "time": now_rfc3339()?,
                "element": element,
                "warnings": warnings,
            }));
            Ok(RunOutcome::ok())
        }
        Command::Check { file } => {
            let text = read_input(file.as_deref())?;
            let (_element, warnings) = element_report(&text)?;
            emit_json(json!({
                "time": now_rfc3339()?,
                "status": "ok",
                "warnings": warnings,
            }));
            Ok(RunOutcome::ok())
        }
    }
}
