// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markup_line(words: usize) -> String {
    let fragments = [
        "plain",
        "**bold**",
        "*italic*",
        "~~gone~~",
        "`code`",
        "==marked==",
        "x^2^",
        "[link](https://example.com)",
        "{name}",
        "**_nested_ text**",
    ];
    let mut line = String::new();
    for i in 0..words {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(fragments[i % fragments.len()]);
    }
    line
}

#[allow(dead_code)]
pub fn generate_plain_line(words: usize) -> String {
    vec!["lorem"; words].join(" ")
}

#[allow(dead_code)]
pub fn generate_distinct_lines(count: usize, words: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("{i}: {}", generate_markup_line(words)))
        .collect()
}
