//! Schema command - prints the input contract of the loaded model.

use core::fmt::Write as _;

use feature_extractor::FieldKind;
use ml_model::ShelterStayModel;

/// Renders the model's schema, one field per line.
#[must_use]
pub fn render(model: &ShelterStayModel) -> String {
    let profile = model.profile();
    let mut out = String::new();

    let _ = writeln!(out, "Model:     {}", model.name());
    let _ = writeln!(out, "Schema:    {}", profile.schema);
    let _ = writeln!(out, "Transform: {}", profile.transform);
    let _ = writeln!(out, "Fields:");

    for (idx, field) in profile.schema.fields().iter().enumerate() {
        let kind = match &field.kind {
            FieldKind::Numeric => "number".to_string(),
            FieldKind::Categorical(None) => "text".to_string(),
            FieldKind::Categorical(Some(allowed)) => format!("one of {}", allowed.join(" | ")),
        };
        let _ = writeln!(out, "  {:>2}. {:<16} {kind}", idx + 1, field.name);
    }

    out
}

/// Runs the schema command.
pub fn run(model: &ShelterStayModel) {
    print!("{}", render(model));
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_render_bundled_schema() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models/modelo_regresion.json");
        let model = ShelterStayModel::load(&path).unwrap();

        let text = render(&model);
        assert!(text.contains("Schema:    basic-v1"));
        assert!(text.contains("Transform: identity"));
        assert!(text.contains("1. age"));
        assert!(text.contains("4. breed"));
        assert!(text.contains("one of Perro | Gato | Conejo | Ave | Otro"));
    }
}
