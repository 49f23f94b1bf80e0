/// Greedy word wrapping.
///
/// Explicit newlines start a new line (blank lines are kept). Words wider
/// than `max_width` on their own are broken between characters. Empty input
/// produces no lines.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();
        let mut produced = false;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                produced = true;
            }
            if measure(word) <= max_width {
                current = word.to_string();
                continue;
            }

            for c in word.chars() {
                current.push(c);
                if measure(&current) > max_width && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::replace(&mut current, c.to_string()));
                    produced = true;
                }
            }
        }

        if !current.is_empty() || !produced {
            lines.push(current);
        }
    }
    lines
}
