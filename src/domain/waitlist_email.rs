use std::fmt::Display;

/// An email submitted to the waitlist.
///
/// Only emptiness is checked. The address is kept verbatim, so two emails
/// differing only in case or surrounding whitespace are distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEmail(String);

impl WaitlistEmail {
    pub fn parse(s: String) -> Result<Self, String> {
        if s.is_empty() {
            Err("Email is required".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl Display for WaitlistEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WaitlistEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<WaitlistEmail> for String {
    fn from(email: WaitlistEmail) -> Self {
        email.0
    }
}
