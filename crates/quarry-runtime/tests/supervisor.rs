//! Process supervision against real child processes.

use quarry_core::prelude::*;
use quarry_runtime::prelude::*;

/// `cat` echoes every byte we send straight back over the channel. The grid
/// dimensions land in `$1`/`$2` of the shell and are ignored.
fn echo() -> AgentProgram {
    AgentProgram::new("sh").with_args(["-c", "exec cat", "quarry-echo"])
}

fn supervisor(program: AgentProgram) -> ProcessSupervisor {
    ProcessSupervisor::new(Bounds::new(5, 5), program.clone(), program)
}

#[test]
fn channel_is_bound_to_stdin_and_stdout() {
    let supervisor = supervisor(echo());
    let mut handle = supervisor.spawn(AgentKind::Hunter).unwrap();

    // The echo returns the 52-byte perception; the first 8 bytes, its
    // position, read back as a move request for that cell.
    let mut perception = PerceptionMessage::new(Coordinate::new(2, 3), Coordinate::INVALID);
    perception.block(Coordinate::new(1, 3));

    handle.send(&perception).unwrap();
    let echoed = handle.receive().unwrap();
    assert_eq!(echoed.requested, Coordinate::new(2, 3));

    let status = supervisor.terminate(handle).unwrap();
    assert!(!status.success());
}

#[test]
fn missing_program_is_a_spawn_failure() {
    let supervisor = supervisor(AgentProgram::new("/nonexistent/quarry-agent"));
    let err = supervisor.spawn(AgentKind::Prey).unwrap_err();
    assert!(matches!(
        err,
        QuarryError::Supervision(SupervisionError::Spawn { kind: "prey", .. })
    ));
}

#[test]
fn agent_exit_reads_as_truncated_request() {
    let supervisor = supervisor(AgentProgram::new("sh").with_args(["-c", "exit 0", "quarry-quit"]));
    let mut handle = supervisor.spawn(AgentKind::Hunter).unwrap();
    let err = handle.receive().unwrap_err();
    assert!(matches!(
        err,
        QuarryError::Protocol(ProtocolError::Truncated { got: 0, .. })
    ));
    // Already exited: kill(2) still succeeds on an unreaped zombie.
    supervisor.terminate(handle).unwrap();
}

#[test]
fn agent_is_handed_the_grid_dimensions() {
    // Echo "$1 $2" as raw bytes is awkward in sh; instead fail unless the
    // arguments are exactly the width and height.
    let program = AgentProgram::new("sh").with_args([
        "-c",
        r#"[ "$1" = 7 ] && [ "$2" = 4 ] && exec cat"#,
        "quarry-args",
    ]);
    let supervisor = ProcessSupervisor::new(Bounds::new(7, 4), program.clone(), program);
    let mut handle = supervisor.spawn(AgentKind::Hunter).unwrap();
    handle
        .send(&PerceptionMessage::new(Coordinate::new(1, 2), Coordinate::INVALID))
        .unwrap();
    assert_eq!(handle.receive().unwrap().requested, Coordinate::new(1, 2));
    supervisor.terminate(handle).unwrap();
}
