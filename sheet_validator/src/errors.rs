use std::error::Error;
use std::fmt::Display;

/// The problems found in a spreadsheet.
///
/// All the stages of the validation append to the same instance, which is only
/// turned into a failure at a few checkpoints (see [`ValidationErrors::raise_if_errors`]).
/// This way, the submitter gets to see as many problems as possible at once.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ValidationErrors {
    messages: Vec<String>,
}

impl ValidationErrors {
    pub fn new() -> ValidationErrors {
        ValidationErrors::default()
    }

    pub fn new_error<S: Into<String>>(&mut self, msg: S) {
        self.messages.push(msg.into());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Checkpoint: fails with all the messages collected so far, if any.
    pub fn raise_if_errors(&self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.clone())
        }
    }
}

impl Error for ValidationErrors {}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation error(s)", self.messages.len())?;
        for msg in self.messages.iter() {
            write!(f, "\n - {}", msg)?;
        }
        Ok(())
    }
}

/// Failure to find one of the required columns.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ColumnError {
    Missing { field: String },
    Ambiguous { field: String, candidates: Vec<String> },
}

impl Error for ColumnError {}

impl Display for ColumnError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnError::Missing { field } => write!(f, "A coluna '{}' não existe", field),
            ColumnError::Ambiguous { field, .. } => write!(
                f,
                "Foi encontrada mais de uma coluna possível para '{}'",
                field
            ),
        }
    }
}
