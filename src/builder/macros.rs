//! Macros for declaring state and event enums.

/// Declare a unit-variant enum implementing [`State`](crate::core::State).
///
/// A variant's name is its identifier unless a label is given with
/// `Variant = "label"`. The generated type derives the serde traits, so the
/// calling crate needs `serde` with the `derive` feature.
///
/// # Example
///
/// ```
/// use turnstile::core::State;
/// use turnstile::state_enum;
///
/// state_enum! {
///     pub enum Door {
///         Closed = "closed",
///         Opened = "opened",
///         Broken,
///     }
/// }
///
/// assert_eq!(Door::Closed.name(), "closed");
/// assert_eq!(Door::Broken.to_string(), "Broken");
/// ```
#[macro_export]
macro_rules! state_enum {
    ($($body:tt)*) => {
        $crate::__label_enum! { $crate::core::State; $($body)* }
    };
}

/// Declare a unit-variant enum implementing [`Event`](crate::core::Event).
///
/// Same syntax as [`state_enum!`].
///
/// ```
/// use turnstile::core::Event;
/// use turnstile::event_enum;
///
/// event_enum! {
///     enum DoorEvent {
///         Open = "open",
///         OpenComplete = "openComplete",
///     }
/// }
///
/// assert_eq!(DoorEvent::OpenComplete.name(), "openComplete");
/// ```
#[macro_export]
macro_rules! event_enum {
    ($($body:tt)*) => {
        $crate::__label_enum! { $crate::core::Event; $($body)* }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __label_enum {
    (
        $label_trait:path;
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $label_trait for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => $crate::__label!($variant $(, $label)?)),*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(match self {
                    $(Self::$variant => $crate::__label!($variant $(, $label)?)),*
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __label {
    ($variant:ident) => {
        stringify!($variant)
    };
    ($variant:ident, $label:literal) => {
        $label
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Event, State};

    state_enum! {
        enum TestState {
            Initial,
            Processing = "processing",
            Complete,
        }
    }

    event_enum! {
        enum TestEvent {
            Begin = "begin",
            Finish,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Processing.name(), "processing");
        assert_eq!(TestState::Complete.name(), "Complete");
    }

    #[test]
    fn event_enum_macro_generates_trait() {
        assert_eq!(TestEvent::Begin.name(), "begin");
        assert_eq!(TestEvent::Finish.name(), "Finish");
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(TestState::Processing.to_string(), "processing");
        assert_eq!(TestEvent::Finish.to_string(), "Finish");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        assert_ne!(PublicState::A, PublicState::B);
    }

    #[test]
    fn generated_labels_serialize() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        let decoded: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, TestState::Processing);
    }
}
