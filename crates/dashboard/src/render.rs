//! Plain-text rendering for the command-line front end.

use std::fmt::Write as _;

use mentorlink_core::pitch::PitchQuestion;
use mentorlink_core::plan_editor::{PlanEditor, RowState};
use mentorlink_core::profile::Relationship;

/// Render a plan newest-first. Collapsed rows show only the header;
/// the expanded row shows content and comments.
pub fn plan(editor: &PlanEditor) -> String {
    let mut out = String::new();
    let plan = editor.plan();
    let _ = writeln!(
        out,
        "Plan {} (mentor {}, mentee {})",
        plan.id,
        plan.mentor.name().unwrap_or(plan.mentor.id()),
        plan.mentee.name().unwrap_or(plan.mentee.id()),
    );
    if editor.is_empty() {
        let _ = writeln!(out, "  (no versions yet)");
        return out;
    }
    for row in editor.rows() {
        let marker = match row.state {
            RowState::Collapsed => '+',
            RowState::ExpandedView | RowState::ExpandedEdit => '-',
        };
        let _ = writeln!(
            out,
            "[{}] {marker} {} {}",
            row.display,
            row.version.label(),
            row.version.title
        );
        if row.state == RowState::Collapsed {
            continue;
        }
        for line in row.version.content.lines() {
            let _ = writeln!(out, "      {line}");
        }
        for comment in &row.version.comments {
            let _ = writeln!(out, "      > {}: {}", comment.author_name, comment.text);
        }
    }
    out
}

pub fn relationships(title: &str, viewer_id: &str, list: &[Relationship]) -> String {
    let mut out = format!("{title} ({})\n", list.len());
    for r in list {
        let other = r.counterpart(viewer_id);
        let _ = writeln!(
            out,
            "  {}  {}  {}",
            r.id,
            other.name().unwrap_or(other.id()),
            other.id()
        );
    }
    out
}

pub fn pitch_questions(questions: &[PitchQuestion]) -> String {
    let mut out = format!("Pitch questions ({})\n", questions.len());
    for (i, q) in questions.iter().enumerate() {
        let _ = writeln!(out, "  {}. [{}] {}", i + 1, q.question_type.as_str(), q.question);
        for option in &q.options {
            let _ = writeln!(out, "       - {option}");
        }
    }
    out
}
