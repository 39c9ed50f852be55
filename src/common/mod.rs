pub mod io;

use env_logger::Env;

/// Reset SIGPIPE to default behavior (SIG_DFL) so `fxsort ... | head` exits
/// quietly instead of reporting a broken pipe. Rust sets SIGPIPE to SIG_IGN by
/// default. This must be called at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix.
/// e.g. "No such file or directory" instead of
/// "No such file or directory (os error 2)".
pub fn io_error_msg(e: &std::io::Error) -> String {
    if let Some(raw) = e.raw_os_error() {
        let os_err = std::io::Error::from_raw_os_error(raw);
        let msg = format!("{}", os_err);
        msg.replace(&format!(" (os error {})", raw), "")
    } else {
        format!("{}", e)
    }
}

/// Initialise `env_logger` for the binary. `RUST_LOG` always wins; otherwise
/// the filter is `info` when verbose and `warn` when not.
pub fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
