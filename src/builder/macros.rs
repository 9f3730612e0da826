//! Macros for declaring action tables and mergeable state.

/// Declare an action table: an enum whose variants each carry one payload,
/// plus its [`ActionSet`](crate::core::ActionSet) implementation.
///
/// Action names default to the variant identifier; `= "name"` overrides it.
/// Payload types must implement `serde::de::DeserializeOwned` so actions can
/// be built by name through [`Store::dispatch_named`](crate::Store::dispatch_named).
/// Use `()` for actions without a payload. Two variants with the same name
/// are a compile error:
///
/// ```compile_fail
/// tinstore::actions! {
///     enum Clash {
///         Add(i64) = "add",
///         Plus(i64) = "add",
///     }
/// }
/// ```
///
/// # Example
///
/// ```
/// use tinstore::actions;
/// use tinstore::core::ActionSet;
///
/// actions! {
///     #[derive(Debug, Clone)]
///     pub enum TodoAction {
///         Add(String) = "add",
///         Toggle(usize) = "toggle",
///         ClearDone(()),
///     }
/// }
///
/// assert_eq!(TodoAction::NAMES, &["add", "toggle", "ClearDone"]);
/// assert_eq!(TodoAction::Toggle(3).name(), "toggle");
/// ```
#[macro_export]
macro_rules! actions {
    (@name $variant:ident) => {
        stringify!($variant)
    };
    (@name $variant:ident $label:literal) => {
        $label
    };
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident ( $payload:ty ) $(= $label:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant($payload)
            ),*
        }

        impl $crate::core::ActionSet for $name {
            const NAMES: &'static [&'static str] = &[
                $($crate::actions!(@name $variant $($label)?)),*
            ];

            fn name(&self) -> &'static str {
                match *self {
                    $(Self::$variant(_) => $crate::actions!(@name $variant $($label)?),)*
                }
            }

            fn from_named(
                name: &str,
                payload: $crate::__private::Value,
            ) -> ::core::result::Result<Self, $crate::error::LookupError> {
                $(
                    if name == $crate::actions!(@name $variant $($label)?) {
                        return $crate::__private::from_value::<$payload>(payload)
                            .map(Self::$variant)
                            .map_err(|source| $crate::error::LookupError::InvalidPayload {
                                name: name.to_string(),
                                source,
                            });
                    }
                )*
                let _ = payload;
                ::core::result::Result::Err($crate::error::LookupError::unknown(
                    name,
                    <Self as $crate::core::ActionSet>::NAMES,
                ))
            }
        }

        const _: () = ::core::assert!(
            $crate::__private::names_are_unique(<$name as $crate::core::ActionSet>::NAMES),
            ::core::concat!("duplicate action name in `", ::core::stringify!($name), "`"),
        );
    };
}

/// Declare a state struct together with a partial "patch" struct and the
/// [`Partial`](crate::core::Partial) implementation that shallow-merges it.
///
/// The patch struct has the same fields wrapped in `Option`, derives `Clone`
/// and `Default`, and takes any attributes written before its name. Every
/// field type must be `Clone`.
///
/// # Example
///
/// ```
/// use tinstore::core::patch;
/// use tinstore::mergeable;
///
/// mergeable! {
///     #[derive(Clone, Debug, PartialEq)]
///     pub struct Settings {
///         pub theme: String,
///         pub volume: u8,
///     }
///     patch: #[derive(Debug)] pub SettingsPatch
/// }
///
/// let settings = Settings { theme: "dark".into(), volume: 3 };
/// let louder = patch(SettingsPatch { volume: Some(7), ..Default::default() });
///
/// assert_eq!(louder(&settings), Settings { theme: "dark".into(), volume: 7 });
/// ```
#[macro_export]
macro_rules! mergeable {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
        patch: $(#[$patch_meta:meta])* $patch_vis:vis $patch:ident
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty
            ),*
        }

        $(#[$patch_meta])*
        #[derive(Clone, Default)]
        $patch_vis struct $patch {
            $($field_vis $field: ::core::option::Option<$ty>),*
        }

        impl $crate::core::Partial for $patch {
            type State = $name;

            fn merge_into(&self, state: &$name) -> $name {
                $name {
                    $(
                        $field: match &self.$field {
                            ::core::option::Option::Some(value) => ::core::clone::Clone::clone(value),
                            ::core::option::Option::None => ::core::clone::Clone::clone(&state.$field),
                        },
                    )*
                }
            }
        }
    };
}
