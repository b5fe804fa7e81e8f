//! Terminal rendering for research notes.

use owo_colors::OwoColorize;

use crate::models::ResearchNote;

/// Render a note as human-readable text. `color` enables ANSI styling and
/// should track whether stdout is a terminal.
pub fn render_note(note: &ResearchNote, color: bool) -> String {
    let mut out = String::new();

    if color {
        out.push_str(&format!("{}\n", note.title.bold()));
    } else {
        out.push_str(&note.title);
        out.push('\n');
    }
    out.push('\n');
    out.push_str(&note.summary);
    out.push('\n');

    if !note.key_points.is_empty() {
        out.push('\n');
        push_heading(&mut out, "Key Points", color);
        for (i, point) in note.key_points.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, point));
        }
    }

    if !note.sources.is_empty() {
        out.push('\n');
        push_heading(&mut out, "Sources", color);
        for (i, source) in note.sources.iter().enumerate() {
            if source.has_url() {
                out.push_str(&format!("{}. {} ({})\n", i + 1, source.title, source.url));
            } else {
                out.push_str(&format!("{}. {}\n", i + 1, source.title));
            }
        }
    }

    out
}

fn push_heading(out: &mut String, heading: &str, color: bool) {
    if color {
        out.push_str(&format!("{}\n", heading.underline()));
    } else {
        out.push_str(heading);
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoteSource;

    #[test]
    fn test_render_plain() {
        let note = ResearchNote {
            title: "Tidal Power".to_string(),
            summary: "Tidal generation is growing.".to_string(),
            key_points: vec!["Capacity doubled in two years".to_string()],
            sources: vec![
                NoteSource::new("Tide Journal", "https://tides.journal.org/t1"),
                NoteSource::title_only("Printed Almanac"),
            ],
        };
        let text = render_note(&note, false);
        assert!(text.starts_with("Tidal Power\n"));
        assert!(text.contains("1. Capacity doubled in two years"));
        assert!(text.contains("1. Tide Journal (https://tides.journal.org/t1)"));
        assert!(text.contains("2. Printed Almanac\n"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_render_skips_empty_sections() {
        let text = render_note(&ResearchNote::default(), false);
        assert!(!text.contains("Key Points"));
        assert!(!text.contains("Sources"));
    }
}
