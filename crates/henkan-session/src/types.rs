use henkan_core::converter::Sentence;

/// Where the engine is in its predict / convert cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Idle,
    /// Candidates come from a prediction search.
    Predicting,
    /// Candidates come from a whole-sentence conversion.
    Converting(Sentence),
    /// Candidates are alternatives for one clause of a converted sentence.
    ClauseBrowsing {
        sentence: Sentence,
        clause_index: usize,
    },
}

impl EngineState {
    /// The converted sentence, if any.
    pub fn sentence(&self) -> Option<&Sentence> {
        match self {
            Self::Converting(sentence) | Self::ClauseBrowsing { sentence, .. } => Some(sentence),
            Self::Idle | Self::Predicting => None,
        }
    }
}
