pub mod config_ops;
pub mod convert_ops;
pub mod dict_ops;

use std::path::Path;
use std::process;

use henkan_engine::dict::{self, MemoryDictionary};
use henkan_engine::reading::LanguageProfile;

/// Resolve a `--lang` argument.
pub fn profile(name: &str) -> LanguageProfile {
    LanguageProfile::from_name(name).unwrap_or_else(|| {
        eprintln!("Error: unknown language '{name}' (available: ja, zh, en)");
        process::exit(1);
    })
}

pub fn open_dir(dict_dir: &str) -> MemoryDictionary {
    die!(
        dict::source::load_dir(Path::new(dict_dir)),
        "Error loading dictionary from {dict_dir}: {}"
    )
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        die!(serde_json::to_string_pretty(value), "Error encoding JSON: {}")
    );
}
