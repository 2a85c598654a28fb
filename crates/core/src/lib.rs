//! Milaap domain logic.
//!
//! Everything in this crate is pure: no database, network, or clock access
//! beyond what callers pass in. The HTTP service and the notification
//! pipeline build on these types.
//!
//! - [`similarity`]: sequence-similarity ratio and keyword extraction.
//! - [`matching`]: cross-report matcher for persons and items.
//! - [`notification`]: notification tasks and alert message templates.
//! - [`inbound`]: replies to inbound chat messages.
//! - [`validation`]: required-field checks for submissions.

/// Define an enum whose variants map one-to-one onto the lowercase text
/// values stored in the database and exchanged over the API.
macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
        )]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $text)] $variant ),+
        }

        impl $name {
            /// All accepted text values, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            /// The stored text value.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $text => Ok($name::$variant), )+
                    other => Err($crate::error::CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        Self::VALUES.join(", ")
                    ))),
                }
            }
        }
    };
}

pub mod error;
pub mod inbound;
pub mod matching;
pub mod notification;
pub mod report;
pub mod similarity;
pub mod types;
pub mod validation;
