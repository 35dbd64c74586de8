//! Readiness multiplexing over agent channels.

use std::io;
use std::os::fd::RawFd;

/// Block, with no timeout, until at least one of `fds` is readable or hung
/// up. Returns one flag per descriptor, in the same order.
///
/// A hang-up counts as ready so that the following read observes the EOF
/// instead of the loop spinning on it. Interrupted waits are retried.
pub fn wait_readable(fds: &[RawFd]) -> io::Result<Vec<bool>> {
    if fds.is_empty() {
        return Ok(Vec::new());
    }

    let mut pollfds: Vec<libc::pollfd> = fds
        .iter()
        .map(|&fd| libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        })
        .collect();

    loop {
        // SAFETY: `pollfds` is a live, correctly sized buffer for the call.
        let rc = unsafe {
            libc::poll(
                pollfds.as_mut_ptr(),
                pollfds.len() as libc::nfds_t,
                -1,
            )
        };
        if rc >= 0 {
            break;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }

    let ready = libc::POLLIN | libc::POLLHUP | libc::POLLERR;
    Ok(pollfds.iter().map(|p| p.revents & ready != 0).collect())
}
