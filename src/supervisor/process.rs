//! OS process signalling by pid

use std::io;
use std::process::Command;

/// Convert a recorded pid into a signal target. Zero and values that would wrap negative are
/// rejected: `kill` treats those as process-group targets.
#[cfg(unix)]
fn target(pid: u32) -> Option<libc::pid_t> {
    libc::pid_t::try_from(pid).ok().filter(|p| *p > 0)
}

/// Existence probe via the null signal. Succeeds only if the process exists and we may signal
/// it. A recycled pid belonging to an unrelated process also reads as alive.
#[cfg(unix)]
pub fn is_alive(pid: u32) -> bool {
    let Some(pid) = target(pid) else {
        return false;
    };
    // SAFETY: signal 0 performs permission and existence checks only.
    unsafe { libc::kill(pid, 0) == 0 }
}

/// Send SIGTERM to `pid`
#[cfg(unix)]
pub fn terminate(pid: u32) -> io::Result<()> {
    let Some(target) = target(pid) else {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("refusing to signal pid {pid}"),
        ));
    };
    // SAFETY: plain kill(2) on a single positive pid.
    if unsafe { libc::kill(target, libc::SIGTERM) } == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

/// Run the spawned program in a new session, detached from the invoking terminal and its
/// process group
#[cfg(unix)]
pub fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;

    // SAFETY: setsid(2) is async-signal-safe and touches no parent memory.
    unsafe {
        command.pre_exec(|| {
            if libc::setsid() == -1 {
                return Err(io::Error::last_os_error());
            }
            Ok(())
        });
    }
}

#[cfg(not(unix))]
pub fn detach(_command: &mut Command) {}

#[cfg(not(unix))]
pub fn is_alive(_pid: u32) -> bool {
    false
}

#[cfg(not(unix))]
pub fn terminate(pid: u32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot signal pid {pid} on this platform"),
    ))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_current_process_is_alive() {
        assert!(is_alive(std::process::id()));
    }

    #[test]
    fn test_invalid_pids_are_not_alive() {
        assert!(!is_alive(0));
        assert!(!is_alive(u32::MAX));
    }

    #[test]
    fn test_terminate_refuses_group_targets() {
        let err = terminate(0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_terminate_and_reap_child() {
        let mut child = std::process::Command::new("sleep").arg("30").spawn().unwrap();
        let pid = child.id();
        assert!(is_alive(pid));

        terminate(pid).unwrap();
        child.wait().unwrap();
        assert!(!is_alive(pid));
    }

    #[test]
    fn test_detached_child_leads_its_own_session() {
        let mut command = Command::new("sleep");
        command.arg("30");
        detach(&mut command);
        let mut child = command.spawn().unwrap();
        let pid = libc::pid_t::try_from(child.id()).unwrap();

        // SAFETY: getsid only reads session ids.
        let (child_sid, own_sid) = unsafe { (libc::getsid(pid), libc::getsid(0)) };
        assert_eq!(child_sid, pid);
        assert_ne!(child_sid, own_sid);

        child.kill().unwrap();
        child.wait().unwrap();
    }
}
