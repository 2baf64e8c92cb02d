//! Splits long replies to fit a channel's message limit, preferring the
//! largest natural boundary that works: paragraph, line, sentence, word, and
//! finally a hard split by characters. Concatenating the chunks always
//! yields the original text.

#[derive(Clone, Copy)]
enum Boundary {
    Paragraph,
    Line,
    Sentence,
    Word,
}

const BOUNDARIES: [Boundary; 4] = [
    Boundary::Paragraph,
    Boundary::Line,
    Boundary::Sentence,
    Boundary::Word,
];

impl Boundary {
    /// Pieces of `text`, each keeping its trailing delimiter.
    fn pieces(self, text: &str) -> Vec<&str> {
        match self {
            Self::Paragraph => text.split_inclusive("\n\n").collect(),
            Self::Line => text.split_inclusive('\n').collect(),
            Self::Sentence => sentences(text),
            Self::Word => text.split_inclusive(' ').collect(),
        }
    }
}

fn sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, _) in text.match_indices(['.', '!', '?']) {
        let end = idx + 1;
        if text[end..].starts_with(' ') {
            pieces.push(&text[start..=end]);
            start = end + 1;
        }
    }
    if start < text.len() {
        pieces.push(&text[start..]);
    }
    pieces
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn hard_split(text: &str, max_chars: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

fn flush(buffer: &mut String, out: &mut Vec<String>) {
    if !buffer.is_empty() {
        out.push(std::mem::take(buffer));
    }
}

fn split_into(text: &str, max_chars: usize, boundaries: &[Boundary], out: &mut Vec<String>) {
    if char_len(text) <= max_chars {
        if !text.is_empty() {
            out.push(text.to_string());
        }
        return;
    }

    let Some((boundary, finer)) = boundaries.split_first() else {
        out.extend(hard_split(text, max_chars));
        return;
    };

    let pieces = boundary.pieces(text);
    if pieces.len() <= 1 {
        split_into(text, max_chars, finer, out);
        return;
    }

    let mut buffer = String::new();
    for piece in pieces {
        let len = char_len(piece);
        if len > max_chars {
            flush(&mut buffer, out);
            split_into(piece, max_chars, finer, out);
            continue;
        }
        if char_len(&buffer) + len > max_chars {
            flush(&mut buffer, out);
        }
        buffer.push_str(piece);
    }
    flush(&mut buffer, out);
}

#[must_use]
pub fn chunk_message(text: &str, max_chars: usize) -> Vec<String> {
    if text.is_empty() || max_chars == 0 {
        return Vec::new();
    }
    let mut chunks = Vec::new();
    split_into(text, max_chars, &BOUNDARIES, &mut chunks);
    chunks
}
