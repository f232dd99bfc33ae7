//! Textual reporting of solved reactions and profiles.

use std::fmt::Write;

use crate::beam::{BeamModel, ProfileKind};

/// Render a human-readable summary of a solved beam.
///
/// Lists every solved reaction and integration constant by label, then the
/// four profile expressions in differentiation order. The output is meant
/// for terminals and log files; plotting front ends should query the
/// profile expressions directly instead of parsing this text.
#[must_use]
pub fn render_summary(model: &BeamModel) -> String {
    let mut output = String::new();

    writeln!(
        &mut output,
        "Beam analysis (length = {}, EI = {:.6e})",
        model.length(),
        model.rigidity()
    )
    .expect("writing to string cannot fail");

    writeln!(&mut output, "Reactions and integration constants:")
        .expect("writing to string cannot fail");
    for unknown in model.unknowns() {
        writeln!(&mut output, "  {}: {:+.6e}", unknown.label, unknown.value)
            .expect("writing to string cannot fail");
    }

    for kind in ProfileKind::ALL {
        writeln!(&mut output, "\n{kind}(x) =").expect("writing to string cannot fail");
        for line in model.profile(kind).to_string().lines() {
            writeln!(&mut output, "  {line}").expect("writing to string cannot fail");
        }
    }

    output
}
