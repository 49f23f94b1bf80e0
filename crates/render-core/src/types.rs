/// Metadata written into the output's information dictionary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentInfo {
    pub title: String,
    pub subject: String,
    pub author: String,
    pub creator: String,
}

impl DocumentInfo {
    /// Metadata for an exercise set produced by `generator`.
    pub fn exercise_set(title: impl Into<String>, generator: impl Into<String>) -> Self {
        let generator = generator.into();
        Self {
            title: title.into(),
            subject: "Exercise Set".to_string(),
            author: generator.clone(),
            creator: generator,
        }
    }
}
