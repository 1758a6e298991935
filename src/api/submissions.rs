use crate::api::AppState;
use crate::api::schemas::contact::ContactForm;
use crate::domain::notice::Indicator;
use crate::domain::submission::SubmissionFields;
use axum::extract::{Form, State, rejection::FormRejection};
use axum::response::Redirect;

/// Submit route. Always answers with a redirect to the view route carrying the outcome.
pub async fn submit(
    State(state): State<AppState>,
    form: Result<Form<ContactForm>, FormRejection>,
) -> Redirect {
    let fields = match form {
        Ok(Form(form)) => SubmissionFields::from(form),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable form body, treating all fields as absent");
            SubmissionFields::default()
        }
    };

    let indicator = match state.submission_service.submit(fields).await {
        Ok(()) => Indicator::Success,
        Err(e) => Indicator::Error(e.error_code()),
    };

    Redirect::to(&indicator.location())
}

/// Any method other than POST on the submit route goes back to the plain form.
pub async fn redirect_to_form() -> Redirect {
    Redirect::to("/")
}
