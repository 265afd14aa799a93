pub const EMPHASIS_BEGIN: &str = "<emphasis_begin>";
pub const EMPHASIS_END: &str = "<emphasis_end>";
pub const INTERJECTION_BEGIN: &str = "<interjection_begin>";
pub const INTERJECTION_END: &str = "<interjection_end>";
pub const INDENTATION_BEGIN: &str = "<indentation_begin>";
pub const INDENTATION_END: &str = "<indentation_end>";

const ALL_MARKERS: [&str; 6] = [
    EMPHASIS_BEGIN,
    EMPHASIS_END,
    INTERJECTION_BEGIN,
    INTERJECTION_END,
    INDENTATION_BEGIN,
    INDENTATION_END,
];

pub fn expand_placeholders(pattern: &str) -> String {
    pattern
        .replace("{/E}", EMPHASIS_END)
        .replace("{E}", EMPHASIS_BEGIN)
        .replace("{/I}", INTERJECTION_END)
        .replace("{I}", INTERJECTION_BEGIN)
        .replace("{/N}", INDENTATION_END)
        .replace("{N}", INDENTATION_BEGIN)
}

pub fn strip_markup(text: &str) -> String {
    let mut stripped = text.to_string();
    for marker in ALL_MARKERS {
        if stripped.contains(marker) {
            stripped = stripped.replace(marker, "");
        }
    }
    stripped
}

pub fn strip_emphasis(text: &str) -> String {
    text.replace(EMPHASIS_BEGIN, "").replace(EMPHASIS_END, "")
}

pub fn strip_indentation(text: &str) -> String {
    text.replace(INDENTATION_BEGIN, "").replace(INDENTATION_END, "")
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

pub fn clean_text(text: &str) -> String {
    collapse_whitespace(&strip_markup(text))
}

pub fn join_repairing_hyphens<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut joined = String::new();

    for line in lines {
        let line = collapse_whitespace(&strip_markup(line));
        if line.is_empty() {
            continue;
        }

        match joined.chars().next_back() {
            None => {}
            Some('-') => {
                let continues_lowercase = line.chars().next().is_some_and(char::is_lowercase);
                if continues_lowercase && splits_lowercase_word(&joined) {
                    joined.pop();
                }
            }
            Some(_) => joined.push(' '),
        }
        joined.push_str(&line);
    }

    joined
}

fn splits_lowercase_word(text: &str) -> bool {
    let mut tail = text.chars().rev();
    tail.next() == Some('-') && tail.next().is_some_and(char::is_lowercase)
}
