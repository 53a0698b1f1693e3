use std::fmt;

/// Identifier of a registered view. The only way views address each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewId {
    Consent,
    ConnectForm,
    IdentityForm,
    Settings,
    Replies,
    Compose,
}

impl ViewId {
    pub const ALL: [ViewId; 6] = [
        ViewId::Consent,
        ViewId::ConnectForm,
        ViewId::IdentityForm,
        ViewId::Settings,
        ViewId::Replies,
        ViewId::Compose,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewId::Consent => "consent",
            ViewId::ConnectForm => "connect_form",
            ViewId::IdentityForm => "identity_form",
            ViewId::Settings => "settings",
            ViewId::Replies => "replies",
            ViewId::Compose => "compose",
        }
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
