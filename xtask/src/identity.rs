//! Build identity: the `(number, revision)` pair stamped into produced binaries.
//!
//! The identity is resolved once and handed to every child process through
//! [`BuildIdentity::apply_to_command`]. The dispatcher's own environment is
//! never written. Caller-provided values are kept as raw `OsString`s so they
//! reach children byte for byte; only display paths convert them lossily.

use std::env;
use std::ffi::{OsStr, OsString};
use std::process::Command;

pub const BUILD_NUMBER_VAR: &str = "PULSE_BUILD_NUMBER";
pub const BUILD_REVISION_VAR: &str = "PULSE_BUILD_REVISION";

/// Value used for both fields when the caller did not provide a build number.
pub const DEFAULT_BUILD_VALUE: &str = "0";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildIdentity {
    pub number: OsString,
    /// `None` only when the caller set a build number without a revision.
    pub revision: Option<OsString>,
    /// True when both values came from [`DEFAULT_BUILD_VALUE`].
    pub defaulted: bool,
}

/// Lossy, printable form of a [`BuildIdentity`] for `plan --json`.
#[derive(Debug, serde::Serialize)]
pub struct IdentityView {
    pub number: String,
    pub revision: Option<String>,
    pub defaulted: bool,
}

impl BuildIdentity {
    pub fn from_env() -> Self {
        Self::resolve(|key| env::var_os(key))
    }

    /// Resolves the identity from an arbitrary variable lookup.
    ///
    /// Presence of the build number is what matters, not its content: an empty
    /// `PULSE_BUILD_NUMBER` still counts as caller-provided.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        match lookup(BUILD_NUMBER_VAR) {
            Some(number) => Self {
                number,
                revision: lookup(BUILD_REVISION_VAR),
                defaulted: false,
            },
            None => Self {
                number: DEFAULT_BUILD_VALUE.into(),
                revision: Some(DEFAULT_BUILD_VALUE.into()),
                defaulted: true,
            },
        }
    }

    pub fn apply_to_command(&self, cmd: &mut Command) {
        cmd.env(BUILD_NUMBER_VAR, &self.number);
        if let Some(revision) = &self.revision {
            cmd.env(BUILD_REVISION_VAR, revision);
        }
    }

    /// `(name, value)` pairs that end up in a child's environment.
    pub fn vars(&self) -> Vec<(&'static str, &OsStr)> {
        let mut vars = vec![(BUILD_NUMBER_VAR, self.number.as_os_str())];
        if let Some(revision) = &self.revision {
            vars.push((BUILD_REVISION_VAR, revision.as_os_str()));
        }
        vars
    }

    pub fn view(&self) -> IdentityView {
        IdentityView {
            number: self.number.to_string_lossy().into_owned(),
            revision: self
                .revision
                .as_deref()
                .map(|r| r.to_string_lossy().into_owned()),
            defaulted: self.defaulted,
        }
    }
}
