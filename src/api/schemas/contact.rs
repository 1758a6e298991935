use crate::domain::submission::SubmissionFields;
use serde::Deserialize;

/// Body of a form post to the submit route. Every field may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl From<ContactForm> for SubmissionFields {
    fn from(form: ContactForm) -> Self {
        Self { name: form.name, email: form.email, message: form.message }
    }
}

/// Query string of the view route. A repeated key keeps its last value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ContactPageQuery {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl FromIterator<(String, String)> for ContactPageQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "success" => query.success = Some(value),
                "error" => query.error = Some(value),
                _ => {}
            }
        }
        query
    }
}
