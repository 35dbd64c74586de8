//! Process supervisor: one OS process per agent.
//!
//! Each agent gets a Unix socket pair. The child's end is bound to both its
//! stdin and stdout, so the agent program only ever talks to its own
//! coordinator channel. The coordinator's end is close-on-exec, so no agent
//! inherits another agent's channel.
//!
//! Every failure here is fatal to the run: the population is fixed and the
//! agent programs are trusted, so there is nothing to retry.

use quarry_core::error::{ProtocolError, QuarryError, Result, SupervisionError};
use quarry_core::types::{AgentKind, Bounds};
use quarry_core::wire::{MoveRequest, PerceptionMessage};
use std::io;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};
use std::os::unix::net::UnixStream;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, info};

/// How to start one kind of agent. The grid width and height are appended
/// to `args` as the final two arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProgram {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl AgentProgram {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `binary` in the same directory as the running executable.
    pub fn sibling_of_current_exe(binary: &str) -> io::Result<Self> {
        let exe = std::env::current_exe()?;
        let dir = exe.parent().unwrap_or_else(|| Path::new("."));
        Ok(Self::new(dir.join(binary)))
    }
}

/// A running agent process and the coordinator's end of its channel.
#[derive(Debug)]
pub struct AgentHandle {
    child: Child,
    channel: UnixStream,
}

impl AgentHandle {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    pub fn send(&mut self, perception: &PerceptionMessage) -> Result<()> {
        perception.write_to(&mut self.channel)?;
        Ok(())
    }

    /// Read exactly one move request. A closed channel is a protocol
    /// violation: agents never hang up on their own.
    pub fn receive(&mut self) -> Result<MoveRequest> {
        MoveRequest::read_from(&mut self.channel)?.ok_or_else(|| {
            QuarryError::Protocol(ProtocolError::Truncated {
                record: "move request",
                expected: MoveRequest::SIZE,
                got: 0,
            })
        })
    }
}

impl AsRawFd for AgentHandle {
    fn as_raw_fd(&self) -> RawFd {
        self.channel.as_raw_fd()
    }
}

/// Spawns and terminates agent processes for one grid.
#[derive(Debug, Clone)]
pub struct ProcessSupervisor {
    bounds: Bounds,
    hunter: AgentProgram,
    prey: AgentProgram,
}

impl ProcessSupervisor {
    pub fn new(bounds: Bounds, hunter: AgentProgram, prey: AgentProgram) -> Self {
        Self {
            bounds,
            hunter,
            prey,
        }
    }

    pub fn program(&self, kind: AgentKind) -> &AgentProgram {
        match kind {
            AgentKind::Hunter => &self.hunter,
            AgentKind::Prey => &self.prey,
        }
    }

    /// Start one agent process connected to a fresh private channel.
    pub fn spawn(&self, kind: AgentKind) -> Result<AgentHandle> {
        let channel_err = |source| SupervisionError::Channel {
            kind: kind.name(),
            source,
        };
        let (channel, child_end) = UnixStream::pair().map_err(channel_err)?;
        let child_stdin = child_end.try_clone().map_err(channel_err)?;

        let program = self.program(kind);
        let mut command = Command::new(&program.program);
        command
            .args(&program.args)
            .arg(self.bounds.width.to_string())
            .arg(self.bounds.height.to_string())
            .stdin(Stdio::from(OwnedFd::from(child_stdin)))
            .stdout(Stdio::from(OwnedFd::from(child_end)))
            .stderr(Stdio::inherit());

        let child = command.spawn().map_err(|source| SupervisionError::Spawn {
            kind: kind.name(),
            program: program.program.display().to_string(),
            source,
        })?;
        // Release our copies of the child's end so its exit reads as EOF.
        drop(command);

        debug!(kind = %kind, pid = child.id(), program = %program.program.display(), "agent spawned");
        Ok(AgentHandle { child, channel })
    }

    /// Send SIGTERM, wait for the process to exit, then close the channel.
    pub fn terminate(&self, handle: AgentHandle) -> Result<ExitStatus> {
        let AgentHandle { mut child, channel } = handle;
        let pid = child.id();

        // SAFETY: `pid` belongs to a child we have not reaped yet, so it
        // cannot have been recycled for an unrelated process.
        let rc = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
        if rc == -1 {
            return Err(SupervisionError::Kill {
                pid,
                source: io::Error::last_os_error(),
            }
            .into());
        }

        let status = child
            .wait()
            .map_err(|source| SupervisionError::Wait { pid, source })?;
        drop(channel);

        info!(pid, %status, "agent terminated");
        Ok(status)
    }
}
