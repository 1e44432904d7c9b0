//! Outcome banners shown on the admin page after a form submission.
//!
//! Create and delete always redirect back to `/admin`; the outcome travels as
//! a short code in the `notice` query parameter.

/// Result of an admin form action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Created,
    Deleted,
    MissingUrl,
    Invalid,
    DuplicateAlias,
    NotFound,
    Failed,
}

impl Notice {
    const ALL: [Notice; 7] = [
        Notice::Created,
        Notice::Deleted,
        Notice::MissingUrl,
        Notice::Invalid,
        Notice::DuplicateAlias,
        Notice::NotFound,
        Notice::Failed,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Notice::Created => "created",
            Notice::Deleted => "deleted",
            Notice::MissingUrl => "missing_url",
            Notice::Invalid => "invalid",
            Notice::DuplicateAlias => "duplicate_alias",
            Notice::NotFound => "not_found",
            Notice::Failed => "failed",
        }
    }

    /// Parses a `notice` query value; unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.code() == code)
    }

    /// Banner text shown to the operator.
    pub fn message(self) -> &'static str {
        match self {
            Notice::Created => "Link created.",
            Notice::Deleted => "Link deleted.",
            Notice::MissingUrl => "A destination URL is required.",
            Notice::Invalid => "The URL or alias is not valid.",
            Notice::DuplicateAlias => "That alias is already taken.",
            Notice::NotFound => "No link with that id.",
            Notice::Failed => "The database rejected the change. See the server log.",
        }
    }

    pub fn is_error(self) -> bool {
        !matches!(self, Notice::Created | Notice::Deleted)
    }

    /// Redirect target carrying this notice.
    pub fn admin_location(self) -> String {
        format!("/admin?notice={}", self.code())
    }
}
