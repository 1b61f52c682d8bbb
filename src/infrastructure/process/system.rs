//! System Process Runner
//!
//! Spawns the tool with stdout and stderr sharing the write end of one pipe,
//! so lines keep the order the tool wrote them in. A reader thread forwards
//! complete lines over a channel; the calling thread delivers them to
//! `on_line` and polls the cancellation token in between.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::debug;

use super::resolve::resolve_executable;
use crate::domain::ports::{
    ExitReport, Invocation, ProcessError, ProcessRunner, DIAGNOSTIC_TAIL_LINES,
};
use crate::domain::value_objects::CancellationToken;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone)]
pub struct SystemProcessRunner {
    poll_interval: Duration,
}

impl Default for SystemProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// How often the cancellation token is checked while the tool is quiet
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn wait_for_exit(
        &self,
        guard: &mut ChildGuard,
        program: &Path,
        cancel: &CancellationToken,
    ) -> Result<ExitStatus, ProcessError> {
        loop {
            if cancel.is_cancelled() {
                guard.kill_and_reap();
                return Err(cancelled(program));
            }
            match guard.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => thread::sleep(self.poll_interval),
                Err(e) => {
                    guard.kill_and_reap();
                    return Err(ProcessError::Io {
                        program: program.to_path_buf(),
                        message: e.to_string(),
                    });
                }
            }
        }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(
        &self,
        invocation: &Invocation,
        on_line: &mut dyn FnMut(&str),
        cancel: &CancellationToken,
    ) -> Result<ExitReport, ProcessError> {
        let program = resolve_executable(invocation.program())?;
        if cancel.is_cancelled() {
            return Err(cancelled(&program));
        }

        let pipe_error = |e: io::Error| ProcessError::Io {
            program: program.clone(),
            message: e.to_string(),
        };
        let (output, stdout_end) = io::pipe().map_err(pipe_error)?;
        let stderr_end = stdout_end.try_clone().map_err(pipe_error)?;

        let mut cmd = Command::new(&program);
        cmd.args(invocation.get_args())
            .envs(invocation.get_env().iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(stdout_end)
            .stderr(stderr_end);
        if let Some(dir) = invocation.working_dir() {
            cmd.current_dir(dir);
        }

        debug!(command = %invocation.display_command(), "spawning tool");
        let spawned = cmd.spawn();
        // The command still owns our copies of the write end; EOF needs them gone.
        drop(cmd);
        let child = spawned.map_err(|e| ProcessError::LaunchFailed {
            program: program.clone(),
            reason: e.to_string(),
        })?;
        let mut guard = ChildGuard::new(child);

        let (tx, rx) = mpsc::channel::<String>();
        let reader = spawn_reader(output, tx);

        let mut tail: VecDeque<String> = VecDeque::with_capacity(DIAGNOSTIC_TAIL_LINES);
        loop {
            if cancel.is_cancelled() {
                guard.kill_and_reap();
                return Err(cancelled(&program));
            }
            match rx.recv_timeout(self.poll_interval) {
                Ok(line) => {
                    on_line(&line);
                    if tail.len() == DIAGNOSTIC_TAIL_LINES {
                        tail.pop_front();
                    }
                    tail.push_back(line);
                }
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        let _ = reader.join();

        let status = self.wait_for_exit(&mut guard, &program, cancel)?;
        debug!(
            command = %invocation.display_command(),
            code = ?status.code(),
            "tool exited"
        );

        Ok(ExitReport {
            code: status.code(),
            tail: tail.into_iter().collect(),
        })
    }
}

fn cancelled(program: &Path) -> ProcessError {
    ProcessError::Cancelled {
        program: program.to_path_buf(),
    }
}

/// Forward complete lines of `stream` until EOF. Invalid UTF-8 is replaced.
fn spawn_reader<R: Read + Send + 'static>(stream: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(stream);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    while matches!(buf.last(), Some(b'\n' | b'\r')) {
                        buf.pop();
                    }
                    let line = String::from_utf8_lossy(&buf).into_owned();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Owns the child until it has been reaped; kills and waits on drop.
struct ChildGuard {
    child: Option<Child>,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self { child: Some(child) }
    }

    fn try_wait(&mut self) -> std::io::Result<Option<ExitStatus>> {
        let Some(child) = self.child.as_mut() else {
            return Ok(None);
        };
        let status = child.try_wait()?;
        if status.is_some() {
            self.child = None;
        }
        Ok(status)
    }

    /// Kills the direct child only. A tool started through a wrapper that
    /// does not `exec` (e.g. `apksigner.bat`) can leave its JVM running.
    fn kill_and_reap(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        self.kill_and_reap();
    }
}
