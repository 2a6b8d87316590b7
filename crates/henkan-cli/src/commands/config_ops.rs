use std::fs;

use henkan_engine::settings;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: converter.clause_cost={}, converter.max_input_length={}, dictionary.max_learn_words={}",
        s.converter.clause_cost, s.converter.max_input_length, s.dictionary.max_learn_words
    );
}
