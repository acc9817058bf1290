/*!
Prints an error the way a user wants to read it from `main`: the message,
followed by every underlying cause.
*/

use std::error::Error as StdError;

pub struct Report {
    message: String,
    causes: Vec<String>,
}

impl std::fmt::Debug for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)?;

        if !self.causes.is_empty() {
            writeln!(f, "\nCaused by:")?;
            for (i, cause) in self.causes.iter().enumerate() {
                writeln!(f, "  {}: {}", i, cause)?;
            }
        }

        Ok(())
    }
}

impl<E: StdError> From<E> for Report {
    fn from(e: E) -> Self {
        let causes = std::iter::successors(e.source(), |&cause| cause.source())
            .map(|cause| cause.to_string())
            .collect();

        Report {
            message: e.to_string(),
            causes,
        }
    }
}
