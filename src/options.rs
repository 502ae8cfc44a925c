//! The option registry: every recognized switch, its default, and resolution
//! of caller-supplied overrides.
//!
//! | Option                                   | Stage            | Default |
//! |------------------------------------------|------------------|---------|
//! | `public_suffix`                          | canonicalization | false   |
//! | `surt`                                   | formatting       | true    |
//! | `reverse_ipaddr`                         | formatting       | true    |
//! | `with_scheme`                            | formatting       | false   |
//! | `trailing_comma`                         | formatting       | false   |
//! | `host_lowercase`                         | canonicalization | true    |
//! | `host_massage`                           | canonicalization | true    |
//! | `auth_strip_user`                        | canonicalization | true    |
//! | `auth_strip_pass`                        | canonicalization | true    |
//! | `port_strip_default`                     | canonicalization | true    |
//! | `path_strip_empty`                       | canonicalization | false   |
//! | `path_lowercase`                         | canonicalization | true    |
//! | `path_strip_session_id`                  | canonicalization | true    |
//! | `path_strip_trailing_slash_unless_empty` | canonicalization | true    |
//! | `query_strip_session_id`                 | canonicalization | true    |
//! | `query_lowercase`                        | canonicalization | true    |
//! | `query_alpha_reorder`                    | canonicalization | true    |
//! | `query_strip_empty`                      | canonicalization | true    |

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

/// Name of a recognized option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionName {
    PublicSuffix,
    Surt,
    ReverseIpaddr,
    WithScheme,
    TrailingComma,
    HostLowercase,
    HostMassage,
    AuthStripUser,
    AuthStripPass,
    PortStripDefault,
    PathStripEmpty,
    PathLowercase,
    PathStripSessionId,
    PathStripTrailingSlashUnlessEmpty,
    QueryStripSessionId,
    QueryLowercase,
    QueryAlphaReorder,
    QueryStripEmpty,
}

impl OptionName {
    /// Every option, in registry order.
    pub const ALL: [OptionName; 18] = [
        OptionName::PublicSuffix,
        OptionName::Surt,
        OptionName::ReverseIpaddr,
        OptionName::WithScheme,
        OptionName::TrailingComma,
        OptionName::HostLowercase,
        OptionName::HostMassage,
        OptionName::AuthStripUser,
        OptionName::AuthStripPass,
        OptionName::PortStripDefault,
        OptionName::PathStripEmpty,
        OptionName::PathLowercase,
        OptionName::PathStripSessionId,
        OptionName::PathStripTrailingSlashUnlessEmpty,
        OptionName::QueryStripSessionId,
        OptionName::QueryLowercase,
        OptionName::QueryAlphaReorder,
        OptionName::QueryStripEmpty,
    ];

    /// The name callers use in option mappings.
    pub fn as_str(self) -> &'static str {
        match self {
            OptionName::PublicSuffix => "public_suffix",
            OptionName::Surt => "surt",
            OptionName::ReverseIpaddr => "reverse_ipaddr",
            OptionName::WithScheme => "with_scheme",
            OptionName::TrailingComma => "trailing_comma",
            OptionName::HostLowercase => "host_lowercase",
            OptionName::HostMassage => "host_massage",
            OptionName::AuthStripUser => "auth_strip_user",
            OptionName::AuthStripPass => "auth_strip_pass",
            OptionName::PortStripDefault => "port_strip_default",
            OptionName::PathStripEmpty => "path_strip_empty",
            OptionName::PathLowercase => "path_lowercase",
            OptionName::PathStripSessionId => "path_strip_session_id",
            OptionName::PathStripTrailingSlashUnlessEmpty => {
                "path_strip_trailing_slash_unless_empty"
            }
            OptionName::QueryStripSessionId => "query_strip_session_id",
            OptionName::QueryLowercase => "query_lowercase",
            OptionName::QueryAlphaReorder => "query_alpha_reorder",
            OptionName::QueryStripEmpty => "query_strip_empty",
        }
    }

    /// Value used when the caller does not mention this option.
    pub fn default_value(self) -> bool {
        !matches!(
            self,
            OptionName::PublicSuffix
                | OptionName::WithScheme
                | OptionName::TrailingComma
                | OptionName::PathStripEmpty
        )
    }
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a name that is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption(pub String);

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option `{}`", self.0)
    }
}

impl std::error::Error for UnknownOption {}

impl FromStr for OptionName {
    type Err = UnknownOption;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownOption(s.to_string()))
    }
}

/// A fully resolved option set: every option has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub public_suffix: bool,
    pub surt: bool,
    pub reverse_ipaddr: bool,
    pub with_scheme: bool,
    pub trailing_comma: bool,
    pub host_lowercase: bool,
    pub host_massage: bool,
    pub auth_strip_user: bool,
    pub auth_strip_pass: bool,
    pub port_strip_default: bool,
    pub path_strip_empty: bool,
    pub path_lowercase: bool,
    pub path_strip_session_id: bool,
    pub path_strip_trailing_slash_unless_empty: bool,
    pub query_strip_session_id: bool,
    pub query_lowercase: bool,
    pub query_alpha_reorder: bool,
    pub query_strip_empty: bool,
}

impl Default for Options {
    fn default() -> Self {
        let mut options = Options {
            public_suffix: false,
            surt: false,
            reverse_ipaddr: false,
            with_scheme: false,
            trailing_comma: false,
            host_lowercase: false,
            host_massage: false,
            auth_strip_user: false,
            auth_strip_pass: false,
            port_strip_default: false,
            path_strip_empty: false,
            path_lowercase: false,
            path_strip_session_id: false,
            path_strip_trailing_slash_unless_empty: false,
            query_strip_session_id: false,
            query_lowercase: false,
            query_alpha_reorder: false,
            query_strip_empty: false,
        };
        for name in OptionName::ALL {
            options.set(name, name.default_value());
        }
        options
    }
}

impl Options {
    /// Resolve a caller-supplied partial mapping against the defaults.
    ///
    /// Names outside the registry are ignored so that callers built against a
    /// newer option set keep working.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use surt::{OptionName, Options};
    ///
    /// let mut partial = HashMap::new();
    /// partial.insert("with_scheme".to_string(), true);
    /// partial.insert("not_an_option".to_string(), true);
    ///
    /// let options = Options::resolve(Some(&partial));
    /// assert!(options.get(OptionName::WithScheme));
    /// assert!(options.get(OptionName::Surt));
    /// ```
    pub fn resolve(partial: Option<&HashMap<String, bool>>) -> Self {
        let mut options = Options::default();

        for (key, value) in partial.into_iter().flatten() {
            match key.parse::<OptionName>() {
                Ok(name) => options.set(name, *value),
                Err(err) => debug!(option = %key, "ignoring option: {}", err),
            }
        }

        options
    }

    /// Current value of an option.
    pub fn get(&self, name: OptionName) -> bool {
        match name {
            OptionName::PublicSuffix => self.public_suffix,
            OptionName::Surt => self.surt,
            OptionName::ReverseIpaddr => self.reverse_ipaddr,
            OptionName::WithScheme => self.with_scheme,
            OptionName::TrailingComma => self.trailing_comma,
            OptionName::HostLowercase => self.host_lowercase,
            OptionName::HostMassage => self.host_massage,
            OptionName::AuthStripUser => self.auth_strip_user,
            OptionName::AuthStripPass => self.auth_strip_pass,
            OptionName::PortStripDefault => self.port_strip_default,
            OptionName::PathStripEmpty => self.path_strip_empty,
            OptionName::PathLowercase => self.path_lowercase,
            OptionName::PathStripSessionId => self.path_strip_session_id,
            OptionName::PathStripTrailingSlashUnlessEmpty => {
                self.path_strip_trailing_slash_unless_empty
            }
            OptionName::QueryStripSessionId => self.query_strip_session_id,
            OptionName::QueryLowercase => self.query_lowercase,
            OptionName::QueryAlphaReorder => self.query_alpha_reorder,
            OptionName::QueryStripEmpty => self.query_strip_empty,
        }
    }

    /// Set the value of an option.
    pub fn set(&mut self, name: OptionName, value: bool) {
        let slot = match name {
            OptionName::PublicSuffix => &mut self.public_suffix,
            OptionName::Surt => &mut self.surt,
            OptionName::ReverseIpaddr => &mut self.reverse_ipaddr,
            OptionName::WithScheme => &mut self.with_scheme,
            OptionName::TrailingComma => &mut self.trailing_comma,
            OptionName::HostLowercase => &mut self.host_lowercase,
            OptionName::HostMassage => &mut self.host_massage,
            OptionName::AuthStripUser => &mut self.auth_strip_user,
            OptionName::AuthStripPass => &mut self.auth_strip_pass,
            OptionName::PortStripDefault => &mut self.port_strip_default,
            OptionName::PathStripEmpty => &mut self.path_strip_empty,
            OptionName::PathLowercase => &mut self.path_lowercase,
            OptionName::PathStripSessionId => &mut self.path_strip_session_id,
            OptionName::PathStripTrailingSlashUnlessEmpty => {
                &mut self.path_strip_trailing_slash_unless_empty
            }
            OptionName::QueryStripSessionId => &mut self.query_strip_session_id,
            OptionName::QueryLowercase => &mut self.query_lowercase,
            OptionName::QueryAlphaReorder => &mut self.query_alpha_reorder,
            OptionName::QueryStripEmpty => &mut self.query_strip_empty,
        };
        *slot = value;
    }

    /// Builder-style [`Options::set`].
    pub fn with(mut self, name: OptionName, value: bool) -> Self {
        self.set(name, value);
        self
    }

    /// Every option and its value, in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionName, bool)> + '_ {
        OptionName::ALL.into_iter().map(move |name| (name, self.get(name)))
    }
}
