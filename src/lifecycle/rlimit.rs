//! File-descriptor limit management.
//!
//! # Responsibilities
//! - Raise the soft RLIMIT_NOFILE to the hard limit at startup
//! - Log the before/after state
//! - Swallow failures: the process continues with the existing limit
//!
//! # Design Decisions
//! - Runs exactly once, synchronously, before the listener is opened
//! - Never fatal; insufficient privilege is a warning, not an error
//! - No-op on non-Unix platforms

/// Raise the soft open-file limit to the hard limit.
#[cfg(unix)]
pub fn raise_fd_limit() {
    let mut limits = libc::rlimit {
        rlim_cur: 0,
        rlim_max: 0,
    };

    // SAFETY: `limits` is a valid out-pointer for the duration of the call.
    if unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limits) } != 0 {
        tracing::warn!(
            error = %std::io::Error::last_os_error(),
            "failed to read RLIMIT_NOFILE"
        );
        return;
    }

    tracing::info!(
        soft = limits.rlim_cur,
        hard = limits.rlim_max,
        "open file limit"
    );

    if limits.rlim_cur == limits.rlim_max {
        return;
    }

    limits.rlim_cur = limits.rlim_max;

    // SAFETY: `limits` is a valid, initialized rlimit struct.
    if unsafe { libc::setrlimit(libc::RLIMIT_NOFILE, &limits) } != 0 {
        tracing::warn!(
            error = %std::io::Error::last_os_error(),
            soft = limits.rlim_cur,
            hard = limits.rlim_max,
            "failed to raise RLIMIT_NOFILE"
        );
        return;
    }

    tracing::info!(
        soft = limits.rlim_cur,
        hard = limits.rlim_max,
        "raised open file limit"
    );
}

/// Raise the soft open-file limit to the hard limit.
#[cfg(not(unix))]
pub fn raise_fd_limit() {}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn raising_is_idempotent_and_never_panics() {
        raise_fd_limit();
        raise_fd_limit();

        // After a successful raise, soft equals hard.
        let mut limits = libc::rlimit {
            rlim_cur: 0,
            rlim_max: 0,
        };
        let rc = unsafe { libc::getrlimit(libc::RLIMIT_NOFILE, &mut limits) };
        assert_eq!(rc, 0);
        assert_eq!(limits.rlim_cur, limits.rlim_max);
    }
}
