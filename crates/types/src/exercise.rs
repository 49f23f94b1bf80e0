use serde::{Deserialize, Serialize};

/// A single exercise. Its text may embed LaTeX delimited by `$...$`,
/// `$$...$$`, `\(...\)` or `\[...\]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    #[serde(default)]
    pub id: i64,
    pub text: String,
}

impl Exercise {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl From<&str> for Exercise {
    fn from(text: &str) -> Self {
        Self::new(0, text)
    }
}

/// The complete input of one export: a title and the ordered exercises.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub title: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl ExerciseSet {
    pub fn new(title: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            title: title.into(),
            exercises,
        }
    }
}
