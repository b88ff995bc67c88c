use crate::model::InstructionSection;

/// Flatten instruction sections into the text stored on the recipe row.
///
/// Each section renders as `"<label>:\n"` followed by its steps joined
/// with newlines; sections are separated by a blank line.
pub fn flatten_instructions(sections: &[InstructionSection]) -> String {
    sections
        .iter()
        .map(|section| format!("{}:\n{}", section.section, section.steps.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n")
}
