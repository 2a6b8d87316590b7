//! Command implementations behind `henkantool`.
//!
//! Every command prints to stdout and exits the process with status 1 on the
//! first error.

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod commands;
