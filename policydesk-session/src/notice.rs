/// Validation failed; field errors are on the form.
pub(crate) const CORRECT_ERRORS: &str = "Please correct the form errors";
pub(crate) const CREATED: &str = "Created successfully";
pub(crate) const UPDATED: &str = "Updated successfully";
pub(crate) const DELETED: &str = "Deleted successfully";
/// A list load failed.
pub(crate) const BACKEND_UNREACHABLE: &str = "Could not connect to the backend";
/// A write never reached the backend.
pub(crate) const CONNECTION_ERROR: &str = "Connection error";
pub(crate) const DELETE_FAILED: &str = "Error deleting record";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// The banner message shown after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
