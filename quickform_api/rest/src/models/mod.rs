use serde::Serialize;

pub mod form;

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
    /// Wire name of the form field the error refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
