//! Macros for declaring operation control phases.

/// Generate a control-phase enum with its [`Phase`](crate::ops::Phase)
/// implementation.
///
/// Every operation machine halts, so the terminal variant list is
/// mandatory.
///
/// # Example
///
/// ```
/// use bitmill::phase_enum;
/// use bitmill::ops::Phase;
///
/// phase_enum! {
///     pub enum PolishPhase {
///         Seek,
///         Buff,
///         Done,
///     }
///     terminal: [Done]
/// }
///
/// assert_eq!(PolishPhase::Seek.name(), "Seek");
/// assert!(!PolishPhase::Buff.is_terminal());
/// assert!(PolishPhase::Done.is_terminal());
/// ```
#[macro_export]
macro_rules! phase_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        terminal: [$($terminal:ident),* $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::ops::Phase for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_terminal(&self) -> bool {
                match self {
                    $(Self::$terminal => true,)*
                    _ => false,
                }
            }
        }
    };
}
