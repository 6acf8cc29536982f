use std::fs;
use std::io::{self, BufRead};

use glyph_core::khipro::{convert, KhiproTable};
use glyph_core::wylie;

/// Run `f` over `text`, or over each stdin line when no text is given.
fn for_each_input(text: &[String], f: impl Fn(&str) -> String) {
    if !text.is_empty() {
        println!("{}", f(&text.join(" ")));
        return;
    }
    for line in io::stdin().lock().lines() {
        let line = die!(line, "Error reading stdin: {}");
        println!("{}", f(&line));
    }
}

pub fn khipro_cmd(text: &[String], config: Option<&str>) {
    if let Some(path) = config {
        let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
        die!(KhiproTable::init_custom(content), "Error: {}");
    }
    for_each_input(text, convert);
}

pub fn wylie_cmd(text: &[String]) {
    for_each_input(text, wylie::to_unicode);
}
