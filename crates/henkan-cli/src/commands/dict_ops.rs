use std::fs;
use std::path::Path;

use henkan_engine::dict::source::USER_DATA_FILE;
use henkan_engine::dict::{ConnectMatrix, DictError, Dictionary, PosKind, Word};

use super::open_dir;

pub fn compile_matrix(input_txt: &str, output_file: &str) {
    let text = die!(fs::read_to_string(input_txt), "Error reading {input_txt}: {}");
    let matrix = die!(ConnectMatrix::from_text(&text), "Error parsing matrix: {}");
    die!(
        matrix.save(Path::new(output_file)),
        "Error writing {output_file}: {}"
    );
    eprintln!("Wrote {output_file} ({0}x{0} classes)", matrix.size());
}

pub fn matrix_info(file: &str) {
    let matrix = die!(ConnectMatrix::open(Path::new(file)), "Error opening {file}: {}");
    let size = matrix.size();
    let connected = (0..size)
        .flat_map(|l| (0..size).map(move |r| (l, r)))
        .filter(|&(l, r)| matrix.cell(l, r) != 0)
        .count();
    println!("classes: {size}");
    println!("connected pairs: {connected}");
}

pub fn user_word_add(dict_dir: &str, reading: &str, surface: &str) {
    let mut dict = open_dir(dict_dir);
    let word = Word::new(reading, surface, dict.pos(PosKind::Default), 0);
    match dict.add_user_word(&word) {
        Ok(()) => {
            save(&dict, dict_dir);
            println!("Added: {reading} → {surface}");
        }
        Err(DictError::DuplicateWord { .. }) => println!("Already exists: {reading} → {surface}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

pub fn user_word_remove(dict_dir: &str, reading: &str, surface: &str) {
    let mut dict = open_dir(dict_dir);
    let word = Word::new(reading, surface, dict.pos(PosKind::Default), 0);
    match dict.remove_user_word(&word) {
        Ok(()) => {
            save(&dict, dict_dir);
            println!("Removed: {reading} → {surface}");
        }
        Err(DictError::WordNotFound { .. }) => println!("Not found: {reading} → {surface}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

pub fn user_word_list(dict_dir: &str) {
    let words = open_dir(dict_dir).user_words();
    if words.is_empty() {
        println!("(empty)");
        return;
    }
    for w in &words {
        println!("{}\t{}", w.reading, w.surface);
    }
    println!("---");
    println!("{} entries", words.len());
}

fn save(dict: &henkan_engine::dict::MemoryDictionary, dict_dir: &str) {
    let path = Path::new(dict_dir).join(USER_DATA_FILE);
    die!(dict.save_user_data(&path), "Error saving user data: {}");
}
