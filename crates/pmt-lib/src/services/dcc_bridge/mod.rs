// DCC Bridges
// Launch vendor tools in batch mode with a generated automation script.
// The bridge only builds paths, script text and command lines, then reads the exit code and stderr.

pub mod maya;
pub mod scripts;
pub mod unreal;

pub use maya::MayaExportBridge;
pub use unreal::UnrealImportBridge;

use std::io;
use std::process::Command;

use crate::utils::error::{IoContext, PmtError, PmtResult};

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutput {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Seam between the bridges and the operating system
pub trait ProcessRunner: Send + Sync {
    /// Run `program` to completion, capturing stdout and stderr
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput>;
}

/// Runs processes with `std::process::Command`, blocking until they exit
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> io::Result<ProcessOutput> {
        log::debug!("[dcc-bridge] Running {} {:?}", program, args);

        let output = Command::new(program).args(args).output()?;

        Ok(ProcessOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Run a tool and turn a non-zero exit into `ProcessFailed` carrying its stderr
pub(crate) fn run_tool(
    runner: &dyn ProcessRunner,
    tool: &str,
    program: &str,
    args: &[String],
) -> PmtResult<ProcessOutput> {
    let output = runner
        .run(program, args)
        .io_context(|| format!("Failed to launch {}", tool))?;

    if output.success {
        log::info!("[dcc-bridge] {} finished successfully", tool);
        return Ok(output);
    }

    let stderr = output.stderr.trim();
    let stderr = if stderr.is_empty() {
        match output.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    } else {
        stderr.to_string()
    };

    log::error!("[dcc-bridge] {} failed: {}", tool, stderr);
    Err(PmtError::ProcessFailed {
        tool: tool.to_string(),
        stderr,
    })
}
