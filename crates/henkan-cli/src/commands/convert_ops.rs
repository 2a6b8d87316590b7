use serde::Serialize;

use henkan_engine::converter::{Clause, ClauseConverter, ConverterConfig};
use henkan_engine::dict::{Dictionary, PosKind, Word};
use henkan_engine::Engine;

use super::{open_dir, print_json, profile};

#[derive(Debug, Serialize)]
struct ClauseReport {
    reading: String,
    surface: String,
    stem: String,
    ancillary: Option<String>,
    frequency: i32,
}

impl From<&Clause> for ClauseReport {
    fn from(c: &Clause) -> Self {
        Self {
            reading: c.reading.clone(),
            surface: c.surface(),
            stem: c.stem.surface.clone(),
            ancillary: c.ancillary.as_ref().map(|a| a.surface.clone()),
            frequency: c.frequency(),
        }
    }
}

#[derive(Debug, Serialize)]
struct SentenceReport {
    reading: String,
    surface: String,
    frequency: i32,
    clauses: Vec<ClauseReport>,
}

pub fn convert_cmd(dict_dir: &str, lang: &str, text: &str, cursor: usize, json: bool) {
    let mut engine = Engine::new(open_dir(dict_dir), profile(lang));
    if engine.convert(text, cursor) == 0 {
        eprintln!("No conversion for '{text}'");
        std::process::exit(1);
    }
    let Some(sentence) = engine.state().sentence() else {
        return;
    };

    let report = SentenceReport {
        reading: sentence.reading(),
        surface: sentence.surface(),
        frequency: sentence.frequency(),
        clauses: sentence.clauses().into_iter().map(ClauseReport::from).collect(),
    };
    if json {
        print_json(&report);
        return;
    }
    println!("{}\t{}", report.surface, report.frequency);
    for (i, c) in report.clauses.iter().enumerate() {
        println!("  [{i}] {}\t{}\t{}", c.reading, c.surface, c.frequency);
    }
}

pub fn clauses_cmd(dict_dir: &str, lang: &str, text: &str, json: bool) {
    let dict = open_dir(dict_dir);
    let profile = profile(lang);
    let reading = profile.reading(text);
    let mut converter = ClauseConverter::new(profile, ConverterConfig::default());
    let terminal = dict.pos(PosKind::AnyEnd);
    let clauses = converter.convert_clause(&dict, &reading, terminal, true);

    let reports: Vec<ClauseReport> = clauses.iter().map(ClauseReport::from).collect();
    if json {
        print_json(&reports);
        return;
    }
    for c in &reports {
        match &c.ancillary {
            Some(anc) => println!("{}\t{} + {}\t{}", c.surface, c.stem, anc, c.frequency),
            None => println!("{}\t{}\t{}", c.surface, c.stem, c.frequency),
        }
    }
}

pub fn predict_cmd(
    dict_dir: &str,
    lang: &str,
    text: &str,
    min_len: usize,
    max_len: Option<usize>,
    limit: usize,
    json: bool,
) {
    let mut engine = Engine::new(open_dir(dict_dir), profile(lang));
    let count = engine.predict(text, min_len, max_len);
    let words: Vec<Word> = std::iter::from_fn(|| engine.next_candidate())
        .take(limit)
        .collect();

    if json {
        print_json(&words);
        return;
    }
    for w in &words {
        println!("{}\t{}\t{}", w.surface, w.reading, w.frequency);
    }
    eprintln!("{count} results in first search, {} shown", words.len());
}
