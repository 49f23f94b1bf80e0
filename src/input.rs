use crate::error::ExportError;
use mathsheet_types::ExerciseSet;
use std::fs;
use std::io;
use std::path::Path;

/// Parses an [`ExerciseSet`] from JSON.
pub fn parse_exercise_set(json: &str) -> Result<ExerciseSet, ExportError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads an [`ExerciseSet`] from a JSON file.
pub fn read_exercise_set(path: impl AsRef<Path>) -> Result<ExerciseSet, ExportError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|e| {
        ExportError::Io(io::Error::new(
            e.kind(),
            format!("Failed to read exercise set from '{}': {}", path.display(), e),
        ))
    })?;
    parse_exercise_set(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json() {
        let set = parse_exercise_set(r#"{"title":"Limits","exercises":[{"id":1,"text":"$x$"}]}"#).unwrap();
        assert_eq!(set.title, "Limits");
        assert_eq!(set.exercises.len(), 1);
    }

    #[test]
    fn missing_title_is_an_error() {
        assert!(matches!(parse_exercise_set(r#"{"exercises":[]}"#), Err(ExportError::Json(_))));
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_exercise_set("/nonexistent/set.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/set.json"));
    }
}
